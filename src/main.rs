use clap::Parser;
use corpus_prep::cmd::command;
use corpus_prep::config::Arg;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let arg = Arg::parse();
    let mut cmd = command(arg)?;

    cmd.run().await?;

    Ok(())
}
