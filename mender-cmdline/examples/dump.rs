//! This example prints every item the iterator produces, including the
//! end marker.
//!
//! Try `cargo run --example dump -- --opt1 a -f pos -- -x --opt1=b`.
use mender_cmdline::{CmdlineOptionsIterator, Error, OptionSpec};

fn main() -> Result<(), Error> {
    let spec = OptionSpec::from_sets(["--opt1", "-o"], ["--flag", "-f"]);
    let mut iter = CmdlineOptionsIterator::from_env(spec);

    loop {
        let done = iter.finished();
        let opt_val = iter.next_option()?;
        println!("({:?}, {:?})", opt_val.option, opt_val.value);
        if done {
            break;
        }
    }

    Ok(())
}
