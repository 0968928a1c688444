use std::fs;

use bl_compiler::model::{Context, Program};
use bl_compiler::processor::ast::{Condition, Statement};
use bl_compiler::processor::codegen::generated_code;
use bl_compiler::processor::instruction::Instruction;
use bl_compiler::processor::listing::disassemble;
use bl_compiler::processor::script_parser::parse_source;
use bl_compiler::processor::{CodegenOptions, JumpStyle};
use bl_compiler::writer::text::{read_compiled, write_compiled};

fn load(name: &str) -> Program {
    let src = fs::read_to_string(format!("tests/data/{name}")).unwrap();
    parse_source(&src).unwrap()
}

fn compile(p: &mut Program, jumps: JumpStyle) -> Vec<u32> {
    generated_code(p, &CodegenOptions { jumps }).unwrap().code
}

fn block_of(names: &[&str]) -> Statement {
    Statement::Block(names.iter().map(|n| Statement::Call(n.to_string())).collect())
}

#[test]
fn compiles_sample2_compat() {
    let mut p = load("program-sample2.bl");
    assert_eq!(
        compile(&mut p, JumpStyle::Compat),
        vec![7, 3, 0, 13, 10, 3, 9, 10, 2, 2, 4, 5]
    );
}

#[test]
fn compiles_sample2_structured() {
    let mut p = load("program-sample2.bl");
    assert_eq!(
        compile(&mut p, JumpStyle::Structured),
        vec![7, 5, 0, 6, 0, 13, 10, 3, 6, 14, 9, 14, 2, 2, 4, 5]
    );
}

#[test]
fn generation_preserves_program_value() {
    for name in ["program-sample.bl", "program-sample2.bl", "program-no-context.bl"] {
        let mut p = load(name);
        let before = p.clone();
        let first = compile(&mut p, JumpStyle::Compat);
        assert_eq!(p, before, "{name}");

        // generating again from the restored program gives the same code
        assert_eq!(compile(&mut p, JumpStyle::Compat), first, "{name}");
        compile(&mut p, JumpStyle::Structured);
        assert_eq!(p, before, "{name}");
    }
}

#[test]
fn output_always_ends_with_halt() {
    let halt = Instruction::Halt.byte_code();
    for name in ["program-sample.bl", "program-sample2.bl", "program-no-context.bl"] {
        for jumps in [JumpStyle::Compat, JumpStyle::Structured] {
            let code = compile(&mut load(name), jumps);
            assert_eq!(code.last(), Some(&halt), "{name}");
            let listing = disassemble(&code).unwrap();
            assert!(listing.last().unwrap().ends_with("HALT"), "{name}");

            // every jump target stays inside the generated sequence
            let mut i = 0;
            while i < code.len() {
                let instr = Instruction::from_byte_code(code[i]).unwrap();
                if instr.takes_target() {
                    assert!((code[i + 1] as usize) < code.len(), "{name} at {i}");
                    i += 2;
                } else {
                    i += 1;
                }
            }
        }
    }
}

#[test]
fn if_jump_targets_end_of_guarded_span() {
    for cond in Condition::ALL {
        for k in 0..5 {
            let names = vec!["move"; k];
            let mut body = Statement::default();
            body.add_to_block(0, {
                let mut s = Statement::default();
                s.assemble_if(cond, block_of(&names));
                s
            });
            let mut p = Program::from_parts("J".into(), Context::new(), body);

            let mut expected = vec![
                Instruction::conditional_jump(cond).byte_code(),
                (k + 2) as u32,
            ];
            expected.extend(vec![Instruction::Move.byte_code(); k]);
            expected.push(Instruction::Halt.byte_code());

            assert_eq!(compile(&mut p, JumpStyle::Compat), expected, "{cond} k={k}");
        }
    }
}

#[test]
fn calls_are_inlined_without_call_opcodes() {
    let bodies: Vec<Vec<&str>> = vec![
        vec![],
        vec!["infect"],
        vec!["move", "turnleft", "skip", "turnright"],
    ];
    for names in bodies {
        let mut context = Context::new();
        context.insert("A".into(), block_of(&names));
        let mut p = Program::from_parts("Inline".into(), context, block_of(&["A"]));

        let mut expected: Vec<u32> = names
            .iter()
            .map(|n| Instruction::primitive(n).unwrap().byte_code())
            .collect();
        expected.push(Instruction::Halt.byte_code());

        assert_eq!(compile(&mut p, JumpStyle::Compat), expected, "{names:?}");
    }
}

#[test]
fn persisted_form_round_trips() {
    let mut p = load("program-sample.bl");
    let code = compile(&mut p, JumpStyle::Compat);

    let mut buf = Vec::new();
    write_compiled(&mut buf, &code).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().next(), Some(code.len().to_string().as_str()));
    assert_eq!(read_compiled(&text).unwrap(), code);
}
