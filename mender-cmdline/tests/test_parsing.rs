use mender_cmdline::{CmdlineOptionsIterator, Error, OptionSpec, OptionValue};

fn spec() -> OptionSpec {
    OptionSpec::from_sets(
        ["--opt1", "-o2", "--opt4", "-o6"],
        ["--opt3", "--opt5", "-o7"],
    )
}

fn ov(option: &str, value: &str) -> OptionValue {
    OptionValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}

#[test]
fn test_basic() -> Result<(), Error> {
    let mut iter = CmdlineOptionsIterator::new(
        [
            "--opt1",
            "val1",
            "-o2",
            "val2",
            "--opt3",
            "arg1",
            "--opt4=val4",
            "arg2",
            "--opt5",
            "-o6=val6",
            "arg3",
            "-o7",
        ],
        spec(),
    );

    assert_eq!(iter.next_option()?, ov("--opt1", "val1"));
    assert_eq!(iter.next_option()?, ov("-o2", "val2"));
    assert_eq!(iter.next_option()?, ov("--opt3", ""));
    assert_eq!(iter.next_option()?, ov("", "arg1"));
    assert_eq!(iter.next_option()?, ov("--opt4", "val4"));
    assert_eq!(iter.next_option()?, ov("", "arg2"));
    assert_eq!(iter.next_option()?, ov("--opt5", ""));
    assert_eq!(iter.next_option()?, ov("-o6", "val6"));
    assert_eq!(iter.next_option()?, ov("", "arg3"));
    assert_eq!(iter.next_option()?, ov("-o7", ""));
    assert!(iter.finished());

    // stays at the end and doesn't fail
    for _ in 0..3 {
        let opt_val = iter.next_option()?;
        assert!(opt_val.is_end());
        assert_eq!(opt_val, OptionValue::end());
        assert_eq!(iter.position(), 12);
    }

    Ok(())
}

#[test]
fn test_double_dash() -> Result<(), Error> {
    let mut iter = CmdlineOptionsIterator::new(
        [
            "--opt1",
            "val1",
            "-o2",
            "val2",
            "--",
            "--opt3",
            "arg1",
            "--opt4=val4",
            "--",
            "--unknown",
        ],
        spec(),
    );

    assert_eq!(iter.next_option()?, ov("--opt1", "val1"));
    assert_eq!(iter.next_option()?, ov("-o2", "val2"));
    assert!(!iter.past_double_dash());

    let opt_val = iter.next_option()?;
    assert!(opt_val.is_terminator());
    assert_eq!(opt_val, ov("--", ""));
    assert!(iter.past_double_dash());

    assert_eq!(iter.next_option()?, ov("", "--opt3"));
    assert_eq!(iter.next_option()?, ov("", "arg1"));
    assert_eq!(iter.next_option()?, ov("", "--opt4=val4"));
    assert_eq!(iter.next_option()?, ov("", "--"));
    assert_eq!(iter.next_option()?, ov("", "--unknown"));
    assert!(iter.next_option()?.is_end());
    assert!(iter.next_option()?.is_end());

    Ok(())
}

#[test]
fn test_positional_only() -> Result<(), Error> {
    let args = ["foo", "bar baz", "/var/lib/mender", "x=y"];
    let iter = CmdlineOptionsIterator::new(args, OptionSpec::new());
    let values = iter.collect::<Result<Vec<_>, _>>()?;
    assert_eq!(
        values,
        args.iter().map(|arg| ov("", arg)).collect::<Vec<_>>()
    );
    assert!(values.iter().all(OptionValue::is_positional));

    Ok(())
}

#[test]
fn test_equal_sign_value() -> Result<(), Error> {
    // the value of the `=` form may look like an option and may contain `=`
    let mut iter =
        CmdlineOptionsIterator::new(["--opt1=-x", "-o2=a=b", "--opt4", "next"], spec());
    assert_eq!(iter.next_option()?, ov("--opt1", "-x"));
    assert_eq!(iter.position(), 1);
    assert_eq!(iter.next_option()?, ov("-o2", "a=b"));
    assert_eq!(iter.position(), 2);
    assert_eq!(iter.next_option()?, ov("--opt4", "next"));
    assert_eq!(iter.position(), 4);
    assert!(iter.next_option()?.is_end());

    Ok(())
}

#[test]
fn test_empty_equal_sign_value_takes_next() -> Result<(), Error> {
    let mut iter = CmdlineOptionsIterator::new(["--opt1=", "val1", "--opt3="], spec());
    assert_eq!(iter.next_option()?, ov("--opt1", "val1"));
    assert_eq!(iter.next_option()?, ov("--opt3", ""));
    assert!(iter.finished());

    Ok(())
}

#[test]
fn test_last_occurrence_is_reported_each_time() -> Result<(), Error> {
    let iter = CmdlineOptionsIterator::new(["-o2", "a", "-o2", "b"], spec());
    let values = iter.collect::<Result<Vec<_>, _>>()?;
    assert_eq!(values, vec![ov("-o2", "a"), ov("-o2", "b")]);

    Ok(())
}

#[test]
fn test_iterator_end() -> Result<(), Error> {
    let mut iter = CmdlineOptionsIterator::new(["", "--opt5"], spec());

    // an empty argument is a positional argument, not the end
    let opt_val = iter.next().expect("empty argument")?;
    assert!(opt_val.is_end());
    assert!(!iter.finished());

    assert_eq!(iter.next().expect("flag")?, ov("--opt5", ""));
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
    assert!(iter.next_option()?.is_end());

    Ok(())
}

#[test]
fn test_empty_command_line() -> Result<(), Error> {
    let mut iter = CmdlineOptionsIterator::new(Vec::<String>::new(), spec());
    assert!(iter.finished());
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert!(iter.next_option()?.is_end());
    assert!(iter.next().is_none());

    Ok(())
}
