use anyhow::Result;

use bench_plot::config::TimingPlotConfig;
use bench_plot::pipeline;

fn main() -> Result<()> {
    env_logger::init();

    let config = TimingPlotConfig::default();
    for path in pipeline::run_timing(&config)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
