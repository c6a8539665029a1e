use anyhow::Result;
use etude::repl::Repl;

fn main() -> Result<()> {
    env_logger::init();
    Repl::new()?.run()
}
