use sessionguard::logger::*;
use sessionguard::settings::Log;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let log = Log {
        filter: "sessionguard=debug,logger_demo=debug".to_string(),
    };
    logger.reload_from_settings(&log)?;
    trace!("application trace log");
    debug!("application debug log");
    info!("application info log");

    let bad = Log {
        filter: "=[".to_string(),
    };
    warn!(rejected = logger.reload_from_settings(&bad).is_err(), "invalid filter");

    Ok(())
}
