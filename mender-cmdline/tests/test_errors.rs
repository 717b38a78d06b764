use mender_cmdline::{CmdlineOptionsIterator, Error, ErrorKind, OptionSpec, OptionValue};

fn spec() -> OptionSpec {
    OptionSpec::from_sets(
        ["--opt1", "-o2", "--opt4", "-o6"],
        ["--opt3", "--opt5", "-o7"],
    )
}

#[test]
fn test_unrecognized_option() -> Result<(), Error> {
    let mut iter = CmdlineOptionsIterator::new(
        ["--opt1", "val1", "-o2"],
        OptionSpec::from_sets(["--opt1", "--opt4", "-o6"], ["--opt3", "--opt5", "-o7"]),
    );
    assert_eq!(
        iter.next_option()?,
        OptionValue {
            option: "--opt1".into(),
            value: "val1".into(),
        }
    );

    let err = iter.next_option().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedOption);
    assert_eq!(err.option(), "-o2");
    assert_eq!(err.to_string(), "Unrecognized option '-o2'");

    Ok(())
}

#[test]
fn test_unrecognized_option_with_value() {
    let mut iter = CmdlineOptionsIterator::new(["--nope=1"], spec());
    let err = iter.next_option().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedOption);
    assert_eq!(err.to_string(), "Unrecognized option '--nope'");
}

#[test]
fn test_single_dash_is_an_option() {
    let mut iter = CmdlineOptionsIterator::new(["-"], spec());
    let err = iter.next_option().unwrap_err();
    assert_eq!(err.to_string(), "Unrecognized option '-'");
}

#[test]
fn test_missing_value() {
    let mut iter = CmdlineOptionsIterator::new(["--opt1", "-o2", "val2"], spec());
    let err = iter.next_option().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingValue);
    assert_eq!(err.option(), "--opt1");
    assert_eq!(err.to_string(), "Option --opt1 missing value");
}

#[test]
fn test_missing_value_trailing() {
    let mut iter = CmdlineOptionsIterator::new(["--opt1"], spec());
    let err = iter.next_option().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingValue);
    assert_eq!(err.to_string(), "Option --opt1 missing value");
}

#[test]
fn test_missing_value_before_double_dash() {
    let mut iter = CmdlineOptionsIterator::new(["-o6", "--", "value"], spec());
    let err = iter.next_option().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingValue);
    assert_eq!(err.to_string(), "Option -o6 missing value");
}

#[test]
fn test_missing_config_value() {
    let spec = OptionSpec::new().with_value("--config").with_value("-c");
    let mut iter = CmdlineOptionsIterator::new(["--config"], spec);
    let err = iter.next().unwrap().unwrap_err();
    assert_eq!(err.to_string(), "Option --config missing value");
}

#[test]
fn test_unexpected_value() {
    let mut iter = CmdlineOptionsIterator::new(["--opt3=val3", "-o2", "val2"], spec());
    let err = iter.next_option().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
    assert_eq!(err.option(), "--opt3");
    assert_eq!(err.to_string(), "Option --opt3 doesn't expect a value");
}

#[test]
fn test_error_formatting() {
    let mut iter = CmdlineOptionsIterator::new(["-o7=x"], spec());
    let err = iter.next_option().unwrap_err();
    assert_eq!(
        format!("{:#}", err),
        "Invalid options given: Option -o7 doesn't expect a value"
    );
    assert_eq!(
        format!("{:?}", err),
        "Error { kind: UnexpectedValue, option: \"-o7\" }"
    );
}
