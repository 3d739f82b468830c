//! Show the game catalog with physical and print dimensions.

use cardpress_deck_model::{print_dimensions, GameKind};

pub fn run() -> anyhow::Result<()> {
    println!("Supported game variants:");
    for game in GameKind::ALL {
        let spec = game.spec();
        let px = print_dimensions(game);
        println!(
            "  {:<4} {:<24} {:>3} cards  {}  ->  {}x{} px @ 300 DPI",
            game.short_code(),
            spec.name,
            spec.card_count,
            spec.dimensions.label,
            px.width,
            px.height,
        );
    }
    Ok(())
}
