use globmux::{matches, Vars};

macro_rules! match_tests {
    ($($name:ident {
        $( $pattern:literal :: $text:literal =>
            $( $(@$none:tt)? None )?
            $( $(@$some:tt)? { $( $key:literal => $val:literal ),* $(,)? } )?
        ),* $(,)?
    }),* $(,)?) => { $(
        #[test]
        fn $name() {
            let mut vars = Vars::new();

            $(
                vars.reset();
                let matched = matches($pattern, $text, &mut vars);

                $($( @$none )?
                    assert!(!matched, "expected `{}` not to match `{}`", $pattern, $text);
                    assert!(
                        vars.is_empty(),
                        "vars must be empty after `{}` failed against `{}`, got {:?}",
                        $pattern, $text, vars,
                    );
                )?

                $($( @$some )?
                    assert!(matched, "expected `{}` to match `{}`", $pattern, $text);

                    let expected: Vec<(&str, &str)> = vec![$(($key, $val)),*];
                    let got = vars.iter().collect::<Vec<_>>();
                    assert_eq!(
                        got, expected,
                        "wrong captures for `{}` against `{}`",
                        $pattern, $text,
                    );
                )?
            )*
        }
    )* };
}

match_tests! {
    literals {
        "abc" :: "abc" => {},
        "abc" :: "abd" => None,
        "abc" :: "ab" => None,
        "abc" :: "abcd" => None,
        "" :: "" => {},
        "" :: "a" => None,
        "a" :: "" => None,
        "/" :: "/" => {},
    },
    star {
        "*" :: "abc" => {},
        "*" :: "" => {},
        "*" :: "a/b" => None,
        "*c" :: "abc" => {},
        "*x" :: "xxx" => {},
        "a*" :: "a" => {},
        "a*" :: "abc" => {},
        "a*" :: "ab/c" => None,
    },
    named {
        "{1}" :: "abc" => { "1" => "abc" },
        "{1}" :: "" => { "1" => "" },
        "{1}" :: "a/b" => None,
        "{1}c" :: "abc" => { "1" => "ab" },
        "{1}x" :: "xxx" => { "1" => "xx" },
        "a{1}" :: "a" => { "1" => "" },
        "a{1}" :: "abc" => { "1" => "bc" },
        "a{1}" :: "ab/c" => None,
    },
    separators {
        "a*/b" :: "abc/b" => {},
        "a*/b" :: "a/c/b" => None,
        "a{1}/b" :: "abc/b" => { "1" => "bc" },
        "a{1}/b" :: "a/c/b" => None,
        "*/a" :: "/a" => {},
        "{1}/a" :: "/a" => { "1" => "" },
        "/*" :: "/" => {},
        "/{1}" :: "/" => { "1" => "" },
        "a?b" :: "a/b" => None,
        "a*b" :: "a/b" => None,
        "a{1}b" :: "a/b" => None,
    },
    multiple_wildcards {
        "a*b*c*d*e*/f" :: "axbxcxdxe/f" => {},
        "a*b*c*d*e*/f" :: "axbxcxdxexxx/f" => {},
        "a*b*c*d*e*/f" :: "axbxcxdxe/xxx/f" => None,
        "a*b*c*d*e*/f" :: "axbxcxdxexxx/fff" => None,
        "a{1}b{2}c{3}d{4}e{5}/f" :: "axbxcxdxe/f" =>
            { "1" => "x", "2" => "x", "3" => "x", "4" => "x", "5" => "" },
        "a{1}b{2}c{3}d{4}e{5}/f" :: "axbxcxdxexxx/f" =>
            { "1" => "x", "2" => "x", "3" => "x", "4" => "x", "5" => "xxx" },
        "a{1}b{2}c{3}d{4}e{5}/f" :: "axbxcxdxe/xxx/f" => None,
        "a{1}b{2}c{3}d{4}e{5}/f" :: "axbxcxdxexxx/fff" => None,
    },
    backtracking {
        "a*b?c*x" :: "abxbbxdbxebxczzx" => {},
        "a*b?c*x" :: "abxbbxdbxebxczzy" => None,
        "a{1}b?c{2}x" :: "abxbbxdbxebxczzx" => { "1" => "bxbbxdbxe", "2" => "zz" },
        "a{1}b?c{2}x" :: "abxbbxdbxebxczzy" => None,
        "a{1}b/c" :: "axb/d" => None,
    },
    unicode {
        "a?b" :: "a☺b" => {},
        "a???b" :: "a☺b" => None,
        "?" :: "é" => {},
        "?" :: "" => None,
        "?" :: "/" => None,
        "{emoji}!" :: "🦀!" => { "emoji" => "🦀" },
        "naïve/{rest}" :: "naïve/café" => { "rest" => "café" },
    },
    malformed {
        // no closing brace: the rest of the pattern becomes the name, which
        // is never closed and so never bound
        "{unterminated" :: "abc" => {},
        "{unterminated" :: "a/b" => None,
    },
}

// Patterns without wildcards behave like string equality.
#[test]
fn literal_patterns_are_equality() {
    let cases = ["", "a", "abc", "/a/b/c", "☺", "a/b"];

    let mut vars = Vars::new();
    for pattern in cases {
        for text in cases {
            assert_eq!(
                matches(pattern, text, &mut vars),
                pattern == text,
                "`{}` against `{}`",
                pattern,
                text,
            );
            assert!(vars.is_empty());
        }
    }
}

// A capture closed by the end of the pattern computes the same span as one
// closed by a trailing literal.
#[test]
fn trailing_capture_finalized_on_exit() {
    let mut trailing = Vars::new();
    assert!(matches("a{1}", "abc", &mut trailing));

    let mut closed = Vars::new();
    assert!(matches("a{1}d", "abcd", &mut closed));

    assert_eq!(trailing.get("1"), "bc");
    assert_eq!(trailing.get("1"), closed.get("1"));
}

// A repeated name binds once, holding the span of the accepted match.
#[test]
fn repeated_name_binds_once() {
    let mut vars = Vars::new();
    assert!(matches("{a}-{a}", "x-y", &mut vars));
    assert_eq!(vars.len(), 1);
    assert_eq!(vars.get("a"), "y");
}

// One Vars list can be reused across successful and failed attempts.
#[test]
fn vars_reuse_across_attempts() {
    let mut vars = Vars::new();

    assert!(matches("/users/{id}", "/users/7", &mut vars));
    assert_eq!(vars.get("id"), "7");

    assert!(!matches("/users/{id}", "/users/7/posts", &mut vars));
    assert!(vars.is_empty());

    assert!(matches("/users/{id}", "/users/8", &mut vars));
    assert_eq!(vars.get("id"), "8");
}
