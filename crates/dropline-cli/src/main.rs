mod command;
mod session;
mod tui;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
