use anyhow::Result;

mod app;
mod config;
mod conversation;
mod handler;
mod support;
mod tui;
mod ui;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    tui::install_panic_hook();

    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new();

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(app, event);
        }

        // A finished exchange is folded in here, so the reply shows up on
        // the next draw at latest one tick after the task resolves.
        app.poll_exchange().await;
    }

    Ok(())
}
