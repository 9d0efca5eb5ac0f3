/* 📖 # Why is the CLI minimal and hand-rolled?

The CLI is a thin demonstration surface over the urlpath library with no
argument-parsing dependency. Each subcommand maps onto exactly one library
operation:

- `urlpath exists <path>`: prints true/false, exit code mirrors the answer
- `urlpath ls <path>`: one listing entry per line, local or remote
- `urlpath cat <path>`: streams the resource body to stdout
- `urlpath uri <path>`: prints the canonical URI form

Exit codes:
- 0: Success (for `exists`: the path exists)
- 1: Error, usage mistake, or (for `exists`) the path does not exist
*/

use std::env;
use std::io;
use std::process;

use urlpath::tracing::init_tracing;
use urlpath::{OpenMode, UrlPath, UrlPathResult};

fn usage() -> ! {
    eprintln!("Usage: urlpath <exists|ls|cat|uri> <path>");
    process::exit(1);
}

fn run(command: &str, path: &UrlPath) -> UrlPathResult<bool> {
    match command {
        "exists" => {
            let exists = path.exists()?;
            println!("{}", exists);
            Ok(exists)
        }
        "ls" => {
            for entry in path.iterdir()? {
                println!("{}", entry?);
            }
            Ok(true)
        }
        "cat" => {
            let mut reader = path.open(OpenMode::Read)?.into_reader()?;
            io::copy(&mut reader, &mut io::stdout().lock())
                .map_err(|e| urlpath::err!("failed to write to stdout: {}", e))?;
            Ok(true)
        }
        "uri" => {
            println!("{}", path.as_uri()?);
            Ok(true)
        }
        _ => usage(),
    }
}

fn main() {
    init_tracing().unwrap();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        usage();
    }
    let command = args[1].as_str();
    let path = UrlPath::new(&args[2]);

    match run(command, &path) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
