use anyhow::Result;

use bench_plot::config::SurvivalPlotConfig;
use bench_plot::pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let config = SurvivalPlotConfig::default();
    for path in pipeline::run_survival(&config)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
