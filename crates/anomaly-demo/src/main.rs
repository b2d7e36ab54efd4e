use clap::Parser;

use anomaly_demo::{Cli, DemoApp};
use anomaly_engine::logging::init_logging;
use anomaly_engine::window::Runtime;

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config();
    init_logging(config.logging_config());

    log::info!(
        "starting {} ({:?} scene, {:?} background, vsync {})",
        config.title,
        config.scene,
        config.background,
        config.vsync
    );

    let runtime_config = config.runtime_config();
    let gpu_init = config.gpu_init();
    let app = DemoApp::new(config)?;

    Runtime::run(runtime_config, gpu_init, app)?;

    log::info!("teardown complete");
    Ok(())
}
