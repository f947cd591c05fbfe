//! tyrpc schema compiler CLI.

use tyrpcc::commands::{check, compile, explain};
use tyrpcc::config::parse_compile_args;
use tyrpcc::{logging, CliError};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let log = args.iter().find_map(|arg| arg.strip_prefix("--log="));
    logging::init(log);

    let command = &args[1];

    match command.as_str() {
        "compile" | "check" => {
            if args.len() < 3 {
                eprintln!("Usage: tyrpc {command} <manifest-root> --package=<id> --entrypoint=<Type> [options]");
                eprintln!();
                eprintln!("Run `tyrpc help` for the full list of options.");
                std::process::exit(1);
            }

            let job = parse_compile_args(&args[2..]).and_then(|parsed| parsed.resolve());
            let job = job.unwrap_or_else(|err| fail(&err));

            if command == "compile" {
                let summary = compile(&job).unwrap_or_else(|err| fail(&err));
                println!(
                    "OK: wrote {} (service {}, {} methods, {} types)",
                    job.output.display(),
                    summary.service,
                    summary.methods,
                    summary.types
                );
            } else {
                let summary = check(&job).unwrap_or_else(|err| fail(&err));
                println!(
                    "OK: service {} ({} methods, {} types)",
                    summary.service, summary.methods, summary.types
                );
            }
        }
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: tyrpc explain <ERROR_CODE>");
                eprintln!("Example: tyrpc explain E1001");
                std::process::exit(1);
            }
            match explain(&args[2]) {
                Ok(doc) => println!("{doc}"),
                Err(err) => {
                    eprintln!("{}", err.report());
                    eprintln!();
                    eprintln!("Codes have the format EXXXX where X is a digit.");
                    eprintln!("Examples: E0001, E1001, E2001");
                    std::process::exit(1);
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("tyrpc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn fail(err: &CliError) -> ! {
    eprintln!("{}", err.report());
    std::process::exit(1);
}

fn print_usage() {
    println!("tyrpc: compile a package's service surface into a proto3 schema");
    println!();
    println!("Usage: tyrpc <command> [options]");
    println!();
    println!("Commands:");
    println!("  compile <manifest-root>  Compile and write the schema");
    println!("  check <manifest-root>    Compile without writing anything");
    println!("  explain <code>           Explain an error code (e.g., E1001)");
    println!("  help                     Show this help message");
    println!("  version                  Show version information");
    println!();
    println!("Compile options:");
    println!("  --package=<id>           Package identifier to load (required)");
    println!("  --entrypoint=<Type>      Type whose methods form the service (required)");
    println!("  --exclude=<A,B>          Methods to skip (default: Open,Close,AddHandler,AddHandlerOnce)");
    println!("  --fieldless=<X,Y>        Struct types emitted without fields");
    println!("  --option=<key=value>     Schema-level option, repeatable");
    println!("  --proto-package=<name>   Schema package statement");
    println!("  --service=<Name>         Service name (default: entrypoint name)");
    println!("  --sort-methods           Emit methods alphabetically");
    println!("  --config=<file.json>     Read settings from a JSON file; flags win");
    println!("  --log=<filter>           Log filter (default: TYRPC_LOG, RUST_LOG, warn)");
    println!("  -o <path>                Output file (default: schema.proto)");
    println!();
    println!("Examples:");
    println!("  tyrpc compile manifests --package=github.com/acme/chat --entrypoint=Client");
    println!("  tyrpc compile chat.json --package=github.com/acme/chat --entrypoint=Client -o chat.proto");
    println!("  tyrpc check --config=tyrpc.json");
    println!("  tyrpc explain E1003");
}
