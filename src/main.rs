use std::env;
use std::io::Write;
use std::process;
use tail_stream::tail_file;
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <file_path>", args[0]);
        process::exit(1);
    }

    let file_path = &args[1];

    match tail_file(file_path, None).await {
        Ok(mut stream) => {
            eprintln!("Tailing file: {}", file_path);
            let mut stdout = std::io::stdout();
            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(bytes) => {
                        if stdout.write_all(&bytes).and_then(|_| stdout.flush()).is_err() {
                            process::exit(1);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error tailing file: {}", e);
                        process::exit(1);
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("Error setting up tail: {}", e);
            process::exit(1);
        }
    }
}
