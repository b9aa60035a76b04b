mod repl;

use anyhow::Context;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use devintensive_core::config::Config;

use repl::{paint, Outcome, Repl};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    devintensive_core::logging::init("devintensive")?;

    let cfg = Config::load()?;
    tracing::info!(locale = ?cfg.locale, "starting Bender session");

    let mut repl = Repl::new(cfg);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    write_outcome(&mut stdout, &repl.greeting()).await?;
    loop {
        stdout.write_all(repl.prompt().as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        let outcome = repl.handle_line(&line, Utc::now())?;
        if outcome == Outcome::Quit {
            break;
        }
        write_outcome(&mut stdout, &outcome).await?;
    }

    stdout.flush().await?;
    Ok(())
}

async fn write_outcome(stdout: &mut tokio::io::Stdout, outcome: &Outcome) -> anyhow::Result<()> {
    let Outcome::Reply { text, color } = outcome else {
        return Ok(());
    };
    let rendered = match color {
        Some(color) => paint(text, *color),
        None => text.clone(),
    };
    stdout
        .write_all(format!("{rendered}\n").as_bytes())
        .await
        .context("failed to write to stdout")?;
    Ok(())
}
