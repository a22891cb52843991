//! JSON lines to stdout from two producer threads
//!
//! Run with: cargo run --example json_to_stdout

use queued_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn spawn_producer(logger: Arc<Logger>, name: &'static str, pause: Duration) -> thread::JoinHandle<Result<()>> {
    thread::spawn(move || {
        let levels = [LogLevel::Debug, LogLevel::Info, LogLevel::Warning, LogLevel::Error];
        for i in 0..5 {
            for level in levels {
                logger.log(level, format!("{} - {} message {}", name, level, i))?;
                thread::sleep(pause);
            }
        }
        Ok(())
    })
}

fn main() -> Result<()> {
    let logger = Arc::new(Logger::new(LogLevel::Debug, ConsoleSink::new(), OutputFormat::Json)?);

    let producers = vec![
        spawn_producer(Arc::clone(&logger), "Thread 1", Duration::from_millis(20)),
        spawn_producer(Arc::clone(&logger), "Thread 2", Duration::from_millis(30)),
    ];

    for producer in producers {
        producer
            .join()
            .map_err(|_| LoggerError::other("producer thread panicked"))??;
    }

    logger.close()
}
