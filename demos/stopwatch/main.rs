//! Full-screen stopwatch.
//!
//! Keys: `s` start, `x` stop, `r` reset, space toggles, `q` quits.
//! Logs are written to `bubbletea-stopwatch.log` in the temp directory;
//! set `RUST_LOG` to change the filter.

use anyhow::Context;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg, Program};
use bubbletea_stopwatch::key::{new_binding, with_help, with_keys_str, Binding};
use bubbletea_stopwatch::stopwatch::{new as stopwatch_new, with_style, Model as Stopwatch};
use lipgloss_extras::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "bubbletea-stopwatch.log";

struct App {
    stopwatch: Stopwatch,
    quit: Binding,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let stopwatch = stopwatch_new(&[with_style(
            Style::new().bold(true).foreground(Color::from("#04B575")),
        )]);
        let quit = new_binding(vec![
            with_keys_str(&["q", "esc", "ctrl+c"]),
            with_help("q", "quit"),
        ]);
        (Self { stopwatch, quit }, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.quit.matches(key_msg) {
                self.stopwatch.unmount();
                return Some(quit());
            }
        }
        self.stopwatch.update(msg)
    }

    fn view(&self) -> String {
        format!(
            "\n  Stopwatch\n\n  {}\n\n  {} {}\n",
            self.stopwatch.view().replace('\n', "\n  "),
            self.quit.help().key,
            self.quit.help().desc,
        )
    }
}

fn init_logging() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bubbletea_stopwatch=debug,stopwatch=info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = init_logging()?;
    tracing::info!("starting stopwatch demo");

    let program = Program::<App>::builder()
        .alt_screen(true)
        .build()
        .context("failed to build program")?;
    program.run().await.context("program exited with an error")?;

    tracing::info!("stopwatch demo finished");
    Ok(())
}
