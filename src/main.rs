fn main() -> anyhow::Result<()> {
    bl_compiler::run()
}
