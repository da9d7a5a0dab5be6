mod app;
mod data;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, default_value = "abilities.json")]
    data: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 840.0]),
        ..Default::default()
    };

    eframe::run_native(
        "synergy-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::SynergyApp::new(cc, args.data.clone())))),
    )
}
