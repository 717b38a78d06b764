//! This is a basic example with help page, usage and error printing.
use mender_cmdline::{CmdlineOptionsIterator, Error, OptionSpec};

const USAGE: &str = "basic [-n NAME]... [--shout] [--help] [--] [ARG]...";
const HELP: &str = "basic
A small example of mender-cmdline

USAGE:
    !!USAGE!!

OPTIONS:
    -n, --name <NAME>   greets a name
    --shout             shouts!
    --help              prints the help\
";

fn execute() -> Result<(), Error> {
    let spec = OptionSpec::new()
        .with_value("-n")
        .with_value("--name")
        .flag("--shout")
        .flag("--help");
    let mut names = Vec::<String>::new();
    let mut args = Vec::<String>::new();
    let mut shout = false;

    for opt_val in CmdlineOptionsIterator::from_env(spec) {
        let opt_val = opt_val?;
        match opt_val.option.as_str() {
            "-n" | "--name" => names.push(opt_val.value),
            "--shout" => shout = true,
            "--help" => {
                println!("{}", HELP.replace("!!USAGE!!", USAGE));
                return Ok(());
            }
            "" => args.push(opt_val.value),
            _ => {}
        }
    }

    if names.is_empty() && args.is_empty() {
        println!("{}", USAGE);
    } else {
        for name in names {
            let greeting = format!("Hello {}!", name);
            if shout {
                println!("{}", greeting.to_uppercase());
            } else {
                println!("{}", greeting);
            }
        }
        println!("args: {:?}", args);
    }

    Ok(())
}

fn main() {
    if let Err(err) = execute() {
        eprintln!("error: {:#}", err);
        eprintln!("  option: {}", err.option());
        std::process::exit(1);
    }
}
