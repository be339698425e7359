use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::ApiClient;
use crate::chat::{ChatSession, SubmitOutcome};
use crate::config::ClientConfig;
use crate::types::Sender;

#[derive(Args)]
pub struct ChatArgs {}

/// Interactive loop over one chat session. Empty line or EOF ends it.
pub async fn execute(config: ClientConfig, _args: ChatArgs) -> Result<()> {
    let client = Arc::new(ApiClient::new(&config));
    let session = ChatSession::new(client);

    for message in session.transcript().await {
        print_message(message.sender, &message.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "you>".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            break;
        }

        match session.submit(&line).await {
            SubmitOutcome::Replied | SubmitOutcome::FellBack => {
                if let Some(last) = session.transcript().await.last() {
                    print_message(last.sender, &last.text);
                }
            }
            SubmitOutcome::RejectedEmpty | SubmitOutcome::RejectedPending => continue,
            SubmitOutcome::Closed => break,
        }
    }

    session.close().await;
    Ok(())
}

fn print_message(sender: Sender, text: &str) {
    match sender {
        Sender::Agent => println!("{} {}", "agent>".magenta().bold(), text),
        Sender::User => println!("{} {}", "you>".cyan().bold(), text),
    }
}
