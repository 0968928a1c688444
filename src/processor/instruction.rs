//! Opcodes understood by the agent virtual machine.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ast::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u32)]
pub enum Instruction {
    Move = 0,
    TurnLeft = 1,
    TurnRight = 2,
    Infect = 3,
    Skip = 4,
    Halt = 5,
    Jump = 6,
    JumpIfNotNextIsEmpty = 7,
    JumpIfNotNextIsNotEmpty = 8,
    JumpIfNotNextIsWall = 9,
    JumpIfNotNextIsNotWall = 10,
    JumpIfNotNextIsFriend = 11,
    JumpIfNotNextIsNotFriend = 12,
    JumpIfNotNextIsEnemy = 13,
    JumpIfNotNextIsNotEnemy = 14,
    JumpIfNotRandom = 15,
    JumpIfNotTrue = 16,
}

impl Instruction {
    /// Every opcode in byte-code order (index == code).
    pub const ALL: [Instruction; 17] = [
        Instruction::Move,
        Instruction::TurnLeft,
        Instruction::TurnRight,
        Instruction::Infect,
        Instruction::Skip,
        Instruction::Halt,
        Instruction::Jump,
        Instruction::JumpIfNotNextIsEmpty,
        Instruction::JumpIfNotNextIsNotEmpty,
        Instruction::JumpIfNotNextIsWall,
        Instruction::JumpIfNotNextIsNotWall,
        Instruction::JumpIfNotNextIsFriend,
        Instruction::JumpIfNotNextIsNotFriend,
        Instruction::JumpIfNotNextIsEnemy,
        Instruction::JumpIfNotNextIsNotEnemy,
        Instruction::JumpIfNotRandom,
        Instruction::JumpIfNotTrue,
    ];

    /// Mnemonics, index-aligned with [`Instruction::ALL`].
    pub const NAMES: &'static [&'static str] = &[
        "MOVE",
        "TURNLEFT",
        "TURNRIGHT",
        "INFECT",
        "SKIP",
        "HALT",
        "JUMP",
        "JUMP_IF_NOT_NEXT_IS_EMPTY",
        "JUMP_IF_NOT_NEXT_IS_NOT_EMPTY",
        "JUMP_IF_NOT_NEXT_IS_WALL",
        "JUMP_IF_NOT_NEXT_IS_NOT_WALL",
        "JUMP_IF_NOT_NEXT_IS_FRIEND",
        "JUMP_IF_NOT_NEXT_IS_NOT_FRIEND",
        "JUMP_IF_NOT_NEXT_IS_ENEMY",
        "JUMP_IF_NOT_NEXT_IS_NOT_ENEMY",
        "JUMP_IF_NOT_RANDOM",
        "JUMP_IF_NOT_TRUE",
    ];

    /// Names a BL program may call without declaring them.
    pub const PRIMITIVES: &'static [(&'static str, Instruction)] = &[
        ("move", Instruction::Move),
        ("turnleft", Instruction::TurnLeft),
        ("turnright", Instruction::TurnRight),
        ("infect", Instruction::Infect),
        ("skip", Instruction::Skip),
    ];

    pub fn byte_code(self) -> u32 {
        self as u32
    }

    pub fn from_byte_code(code: u32) -> Option<Instruction> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn primitive(name: &str) -> Option<Instruction> {
        Self::PRIMITIVES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, i)| *i)
    }

    pub fn is_primitive_name(name: &str) -> bool {
        Self::primitive(name).is_some()
    }

    pub fn conditional_jump(c: Condition) -> Instruction {
        match c {
            Condition::NextIsEmpty => Instruction::JumpIfNotNextIsEmpty,
            Condition::NextIsNotEmpty => Instruction::JumpIfNotNextIsNotEmpty,
            Condition::NextIsEnemy => Instruction::JumpIfNotNextIsEnemy,
            Condition::NextIsNotEnemy => Instruction::JumpIfNotNextIsNotEnemy,
            Condition::NextIsFriend => Instruction::JumpIfNotNextIsFriend,
            Condition::NextIsNotFriend => Instruction::JumpIfNotNextIsNotFriend,
            Condition::NextIsWall => Instruction::JumpIfNotNextIsWall,
            Condition::NextIsNotWall => Instruction::JumpIfNotNextIsNotWall,
            Condition::Random => Instruction::JumpIfNotRandom,
            Condition::True => Instruction::JumpIfNotTrue,
        }
    }

    /// Whether the opcode is followed by a jump-target offset in the code.
    pub fn takes_target(self) -> bool {
        self.byte_code() >= Instruction::Jump.byte_code()
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
