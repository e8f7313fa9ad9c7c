use gnuopt::{
    ArgumentBuilder, ArgumentConfig, ConfigError, Error, IndexMap, Matches, OptionBuilder,
    OptionConfig, ParseOutcome, Parser, UsageError, Value,
};

type Options = IndexMap<String, OptionConfig>;
type Arguments = IndexMap<String, ArgumentConfig>;

fn options(entries: Vec<(&str, OptionBuilder)>) -> Options {
    entries
        .into_iter()
        .map(|(name, b)| (name.to_string(), b.build().expect("invalid option config")))
        .collect()
}

fn arguments(entries: Vec<(&str, ArgumentBuilder)>) -> Arguments {
    entries
        .into_iter()
        .map(|(name, b)| (name.to_string(), b.build().expect("invalid argument config")))
        .collect()
}

fn parse(opts: &Options, args: &Arguments, tokens: &[&str]) -> Result<ParseOutcome, Error> {
    Parser::new(opts, args).parse(tokens)
}

fn matches(opts: &Options, args: &Arguments, tokens: &[&str]) -> Matches {
    match parse(opts, args, tokens) {
        Ok(ParseOutcome::Parsed(m)) => m,
        other => panic!("expected Parsed for {tokens:?}, got: {other:?}"),
    }
}

fn values(entries: &[(&str, Value)]) -> IndexMap<String, Value> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn short(c: char) -> OptionBuilder {
    OptionBuilder::new().short(c).unwrap()
}

fn long(name: &str) -> OptionBuilder {
    OptionBuilder::new().long(name).unwrap()
}

fn bundle_options() -> Options {
    options(vec![
        ("a", short('a')),
        ("b", short('b').incrementable(1)),
        ("c", short('c').argument("optarg").unwrap().default_value("defval")),
    ])
}

#[test]
fn flags_given_and_omitted() {
    let opts = options(vec![("test", short('t'))]);
    let args = Arguments::new();
    assert_eq!(
        matches(&opts, &args, &["-t"]).options(),
        &values(&[("test", Value::Bool(true))])
    );
    assert_eq!(
        matches(&opts, &args, &[]).options(),
        &values(&[("test", Value::Null)])
    );

    let opts = options(vec![("test", long("test").default_value(false))]);
    assert_eq!(
        matches(&opts, &args, &[]).options(),
        &values(&[("test", Value::Bool(false))])
    );
    assert_eq!(
        matches(&opts, &args, &["--test"]).options(),
        &values(&[("test", Value::Bool(true))])
    );
}

#[test]
fn valued_options() {
    let opts = options(vec![(
        "test",
        short('t')
            .long("test")
            .unwrap()
            .argument("optarg")
            .unwrap(),
    )]);
    let args = Arguments::new();
    for tokens in [&["-t", "argval"][..], &["--test", "argval"][..], &["--test=argval"][..]] {
        let m = matches(&opts, &args, tokens);
        assert_eq!(m.option("test"), Some(&Value::from("argval")), "{tokens:?}");
        assert!(m.arguments().is_empty());
    }
    assert_eq!(matches(&opts, &args, &[]).option("test"), Some(&Value::Null));
}

#[test]
fn default_for_omitted_valued_option() {
    let opts = options(vec![("c", short('c').argument("x").unwrap().default_value("defval"))]);
    let m = matches(&opts, &Arguments::new(), &[]);
    assert_eq!(m.options(), &values(&[("c", Value::from("defval"))]));
}

#[test]
fn incrementable_counts_every_occurrence() {
    let opts = options(vec![("t", short('t').incrementable(1))]);
    let args = Arguments::new();
    assert_eq!(
        matches(&opts, &args, &["-t", "-t", "-t"]).option("t"),
        Some(&Value::Int(3))
    );
    assert_eq!(matches(&opts, &args, &["-ttt"]).option("t"), Some(&Value::Int(3)));

    let opts = options(vec![("test", long("test").short('t').unwrap().incrementable(2))]);
    assert_eq!(
        matches(&opts, &args, &["-t", "--test", "-t"]).option("test"),
        Some(&Value::Int(6))
    );
}

#[test]
fn incrementable_saturates_instead_of_overflowing() {
    let opts = options(vec![("t", short('t').incrementable(i64::MAX))]);
    let args = Arguments::new();
    assert_eq!(matches(&opts, &args, &["-tt"]).option("t"), Some(&Value::Int(i64::MAX)));

    let opts = options(vec![("t", short('t').incrementable(i64::MIN))]);
    assert_eq!(
        matches(&opts, &args, &["-t", "-t", "-t"]).option("t"),
        Some(&Value::Int(i64::MIN))
    );
}

#[test]
fn negated_counter_still_increments() {
    let opts = options(vec![("verbose", long("verbose").incrementable(1).negatable())]);
    let args = Arguments::new();
    assert_eq!(
        matches(&opts, &args, &["--verbose", "--noverbose"]).option("verbose"),
        Some(&Value::Int(2))
    );
    assert_eq!(
        matches(&opts, &args, &["--noverbose"]).option("verbose"),
        Some(&Value::Int(1))
    );
}

#[test]
fn multiple_values_collect_in_order() {
    let opts = options(vec![(
        "test",
        long("test")
            .short('t')
            .unwrap()
            .argument("optarg")
            .unwrap()
            .multiple()
            .default_value(vec!["x", "y"]),
    )]);
    let args = Arguments::new();
    assert_eq!(
        matches(&opts, &args, &["-t", "a", "--test", "b", "-t", "c"]).option("test"),
        Some(&Value::from(vec!["a", "b", "c"]))
    );
    assert_eq!(
        matches(&opts, &args, &[]).option("test"),
        Some(&Value::from(vec!["x", "y"]))
    );
    // the first value replaces the default instead of extending it
    assert_eq!(
        matches(&opts, &args, &["--test=z"]).option("test"),
        Some(&Value::from(vec!["z"]))
    );

    let err = parse(&opts, &args, &["-t", "a", "-t"]).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::MissingOptionArgument("-t".to_string()))
    );
}

#[test]
fn short_option_bundling() {
    let opts = bundle_options();
    let m = matches(&opts, &Arguments::new(), &["-bababc", "argval"]);
    assert_eq!(
        m.options(),
        &values(&[
            ("a", Value::Bool(true)),
            ("b", Value::Int(3)),
            ("c", Value::from("argval")),
        ])
    );

    let err = parse(&opts, &Arguments::new(), &["-bababc"]).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::MissingOptionArgument("-c".to_string()))
    );
}

#[test]
fn negatable_flags() {
    let opts = options(vec![("test", long("test").negatable())]);
    let args = Arguments::new();
    assert_eq!(
        matches(&opts, &args, &["--notest"]).option("test"),
        Some(&Value::Bool(false))
    );
    assert_eq!(
        matches(&opts, &args, &["--test"]).option("test"),
        Some(&Value::Bool(true))
    );
    assert_eq!(
        matches(&opts, &args, &["--test", "--notest"]).option("test"),
        Some(&Value::Bool(false))
    );
}

#[test]
fn negation_needs_negatable_option() {
    let opts = options(vec![("test", long("test"))]);
    let err = parse(&opts, &Arguments::new(), &["--notest"]).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::UnrecognizedOption("--notest".to_string()))
    );
}

#[test]
fn unrecognized_options_carry_the_token() {
    let opts = bundle_options();
    let args = Arguments::new();
    for (tokens, token) in [
        (&["-x"][..], "-x"),
        (&["-abx"][..], "-abx"),
        (&["--nope"][..], "--nope"),
        (&["--nope=1"][..], "--nope=1"),
    ] {
        let err = parse(&opts, &args, tokens).unwrap_err();
        assert_eq!(
            err,
            Error::Usage(UsageError::UnrecognizedOption(token.to_string())),
            "{tokens:?}"
        );
    }
}

#[test]
fn option_validators() {
    let opts = options(vec![("test", long("test").validator(|_: &Value| true))]);
    assert_eq!(
        matches(&opts, &Arguments::new(), &["--test"]).option("test"),
        Some(&Value::Bool(true))
    );

    let opts = options(vec![(
        "test",
        long("test")
            .argument("optarg")
            .unwrap()
            .validator(|_: &Value| false),
    )]);
    let err = parse(&opts, &Arguments::new(), &["--test", "optval"]).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::InvalidOption {
            option: "--test".to_string(),
            value: Value::from("optval"),
        })
    );
}

#[test]
fn multiple_option_validator_sees_each_element() {
    let opts = options(vec![(
        "n",
        short('n')
            .argument("num")
            .unwrap()
            .multiple()
            .validator(|v: &Value| v.as_str().is_some_and(|s| s.parse::<u32>().is_ok())),
    )]);
    let args = Arguments::new();
    assert_eq!(
        matches(&opts, &args, &["-n", "1", "-n", "2"]).option("n"),
        Some(&Value::from(vec!["1", "2"]))
    );
    let err = parse(&opts, &args, &["-n", "1", "-n", "two"]).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::InvalidOption {
            option: "-n".to_string(),
            value: Value::from("two"),
        })
    );
}

#[test]
fn validators_skip_defaults() {
    let opts = options(vec![(
        "c",
        short('c')
            .argument("x")
            .unwrap()
            .default_value("anything")
            .validator(|_: &Value| false),
    )]);
    let m = matches(&opts, &Arguments::new(), &[]);
    assert_eq!(m.option("c"), Some(&Value::from("anything")));
}

#[test]
fn required_option_missing() {
    let opts = options(vec![("mode", long("mode").argument("m").unwrap().required())]);
    let err = parse(&opts, &Arguments::new(), &[]).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::MissingOptions("--mode".to_string()))
    );
}

#[test]
fn argument_validators() {
    let args = arguments(vec![("test", ArgumentBuilder::new().validator(|_: &Value| true))]);
    assert_eq!(
        matches(&Options::new(), &args, &["test"]).arguments(),
        &values(&[("test", Value::from("test"))])
    );

    let args = arguments(vec![("test", ArgumentBuilder::new().validator(|_: &Value| false))]);
    let err = parse(&Options::new(), &args, &["test"]).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::InvalidArgument("test".to_string()))
    );
}

#[test]
fn optional_and_required_arguments() {
    let opts = Options::new();
    let args = arguments(vec![("arg", ArgumentBuilder::new())]);
    assert_eq!(matches(&opts, &args, &["test"]).argument("arg"), Some(&Value::from("test")));
    assert_eq!(matches(&opts, &args, &[]).argument("arg"), Some(&Value::Null));

    let args = arguments(vec![("arg", ArgumentBuilder::new().default_value("defval"))]);
    assert_eq!(matches(&opts, &args, &[]).argument("arg"), Some(&Value::from("defval")));

    let args = arguments(vec![
        ("x", ArgumentBuilder::new().required()),
        ("y", ArgumentBuilder::new()),
    ]);
    assert_eq!(
        matches(&opts, &args, &["x"]).arguments(),
        &values(&[("x", Value::from("x")), ("y", Value::Null)])
    );
    let err = parse(&opts, &args, &[]).unwrap_err();
    assert_eq!(
        err,
        Error::Usage(UsageError::MissingArguments("x".to_string()))
    );
}

#[test]
fn multiple_argument_takes_the_rest() {
    let args = arguments(vec![("x", ArgumentBuilder::new().multiple())]);
    assert_eq!(
        matches(&Options::new(), &args, &["a", "b", "c"]).argument("x"),
        Some(&Value::from(vec!["a", "b", "c"]))
    );
    assert_eq!(
        matches(&Options::new(), &args, &["a"]).argument("x"),
        Some(&Value::from(vec!["a"]))
    );

    let args = arguments(vec![
        ("first", ArgumentBuilder::new().required()),
        ("rest", ArgumentBuilder::new().multiple().default_value(Vec::<String>::new())),
    ]);
    let m = matches(&Options::new(), &args, &["a"]);
    assert_eq!(m.argument("rest"), Some(&Value::List(Vec::new())));
}

#[test]
fn too_many_arguments() {
    let args = arguments(vec![("x", ArgumentBuilder::new())]);
    let err = parse(&Options::new(), &args, &["a", "b"]).unwrap_err();
    assert_eq!(err, Error::Usage(UsageError::TooManyArguments));

    let err = parse(&Options::new(), &Arguments::new(), &["a"]).unwrap_err();
    assert_eq!(err, Error::Usage(UsageError::TooManyArguments));
}

#[test]
fn end_of_option_processing() {
    let opts = options(vec![(
        "test",
        short('t').long("test").unwrap().incrementable(1),
    )]);
    let args = arguments(vec![
        ("a", ArgumentBuilder::new()),
        ("b", ArgumentBuilder::new()),
        ("c", ArgumentBuilder::new()),
        ("d", ArgumentBuilder::new()),
    ]);
    let m = matches(
        &opts,
        &args,
        &["--test", "-t", "a", "--", "b", "-t", "--test"],
    );
    assert_eq!(m.options(), &values(&[("test", Value::Int(2))]));
    assert_eq!(
        m.arguments(),
        &values(&[
            ("a", Value::from("a")),
            ("b", Value::from("b")),
            ("c", Value::from("-t")),
            ("d", Value::from("--test")),
        ])
    );
}

#[test]
fn end_marker_can_be_an_option_value() {
    let opts = options(vec![("c", short('c').argument("x").unwrap())]);
    let args = arguments(vec![("rest", ArgumentBuilder::new().multiple())]);
    let m = matches(&opts, &args, &["-c", "--", "-c", "x"]);
    assert_eq!(m.option("c"), Some(&Value::from("x")));
    assert_eq!(m.argument("rest"), Some(&Value::Null));

    let m = matches(&opts, &args, &["-c", "--", "--", "-c"]);
    assert_eq!(m.option("c"), Some(&Value::from("--")));
    assert_eq!(m.argument("rest"), Some(&Value::from(vec!["-c"])));
}

#[test]
fn options_and_arguments_mixed() {
    let opts = bundle_options();
    let args = arguments(vec![
        ("x", ArgumentBuilder::new().required()),
        ("y", ArgumentBuilder::new()),
    ]);

    let cases: Vec<(Vec<&str>, [Value; 3], [Value; 2])> = vec![
        (
            vec!["x"],
            [Value::Null, Value::Null, Value::from("defval")],
            [Value::from("x"), Value::Null],
        ),
        (
            vec!["x", "y"],
            [Value::Null, Value::Null, Value::from("defval")],
            [Value::from("x"), Value::from("y")],
        ),
        (
            vec!["-c", "c", "x"],
            [Value::Null, Value::Null, Value::from("c")],
            [Value::from("x"), Value::Null],
        ),
        (
            vec!["x", "-c", "c"],
            [Value::Null, Value::Null, Value::from("c")],
            [Value::from("x"), Value::Null],
        ),
        (
            vec!["x", "-c", "c", "y"],
            [Value::Null, Value::Null, Value::from("c")],
            [Value::from("x"), Value::from("y")],
        ),
        (
            vec!["-bac", "c", "x", "-b"],
            [Value::Bool(true), Value::Int(2), Value::from("c")],
            [Value::from("x"), Value::Null],
        ),
    ];

    for (tokens, [a, b, c], [x, y]) in cases {
        let m = matches(&opts, &args, &tokens);
        assert_eq!(
            m.options(),
            &values(&[("a", a), ("b", b), ("c", c)]),
            "{tokens:?}"
        );
        assert_eq!(m.arguments(), &values(&[("x", x), ("y", y)]), "{tokens:?}");
    }
}

#[test]
fn required_argument_after_optional_is_a_config_error() {
    let args = arguments(vec![
        ("x", ArgumentBuilder::new()),
        ("y", ArgumentBuilder::new().required()),
    ]);
    let err = parse(&Options::new(), &args, &["a", "b"]).unwrap_err();
    assert_eq!(
        err,
        Error::Config(ConfigError::RequiredAfterOptional("y".to_string()))
    );
    assert!(!err.is_usage());
}

#[test]
fn only_last_argument_may_be_multiple() {
    let args = arguments(vec![
        ("x", ArgumentBuilder::new().multiple()),
        ("y", ArgumentBuilder::new()),
    ]);
    let err = parse(&Options::new(), &args, &["a", "b"]).unwrap_err();
    assert_eq!(
        err,
        Error::Config(ConfigError::MultipleNotLast("x".to_string()))
    );
}

#[test]
fn help_sentinel_short_circuits() {
    let mut opts = options(vec![("c", short('c').argument("x").unwrap().required())]);
    opts.insert(
        gnuopt::HELP_OPTION_NAME.to_string(),
        short('h').long("help").unwrap().build().unwrap(),
    );
    let args = arguments(vec![("x", ArgumentBuilder::new().required())]);

    for tokens in [&["-h"][..], &["--help"][..], &["x", "--help"][..], &["-h", "--bogus"][..]] {
        assert_eq!(parse(&opts, &args, tokens), Ok(ParseOutcome::Help), "{tokens:?}");
    }
    let err = parse(&opts, &args, &["--bogus", "-h"]).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn inline_value_on_a_flag_becomes_positional() {
    let opts = options(vec![("v", long("verbose"))]);
    let args = arguments(vec![("file", ArgumentBuilder::new())]);
    let m = matches(&opts, &args, &["--verbose=x"]);
    assert_eq!(m.option("v"), Some(&Value::Bool(true)));
    assert_eq!(m.argument("file"), Some(&Value::from("x")));
}

#[test]
fn result_keeps_registration_order() {
    let opts = options(vec![("zeta", short('z')), ("alpha", short('a'))]);
    let m = matches(&opts, &Arguments::new(), &["-a", "-z"]);
    let names: Vec<&String> = m.options().keys().collect();
    assert_eq!(names, ["zeta", "alpha"]);
}
