//! JSON lines appended to a file from two producer threads
//!
//! Run with: cargo run --example json_to_file

use queued_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    let log_path = std::env::temp_dir().join("queued_logger_demo.json");
    let logger = Arc::new(Logger::new(LogLevel::Debug, FileSink::new(&log_path)?, OutputFormat::Json)?);

    let producers: Vec<_> = [("Thread 1", 20u64), ("Thread 2", 30u64)]
        .into_iter()
        .map(|(name, pause_ms)| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || -> Result<()> {
                for i in 0..5 {
                    logger.debug(format!("{} - DEBUG message {}", name, i))?;
                    logger.info(format!("{} - INFO message {}", name, i))?;
                    logger.warning(format!("{} - WARNING message {}", name, i))?;
                    logger.error(format!("{} - ERROR message {}", name, i))?;
                    thread::sleep(Duration::from_millis(pause_ms));
                }
                Ok(())
            })
        })
        .collect();

    for producer in producers {
        producer
            .join()
            .map_err(|_| LoggerError::other("producer thread panicked"))??;
    }

    logger.close()?;
    println!("Wrote {} lines to {}", logger.metrics().written_count(), log_path.display());
    Ok(())
}
