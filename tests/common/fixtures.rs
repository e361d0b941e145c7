//! Go sources shared by the integration tests.
//!
//! `c` switches over its own kinds and over kinds of `a`, `b` and `x/a`
//! (imported as `xa`). Each switch expected to be reported carries a
//! `// want "<message>"` marker on its own line.

pub const PACKAGE_A: &str = r#"package a

type TestKind int

const (
	TestKindHoge TestKind = iota
	TestKindFuga
	TestKindPiyo
)
"#;

pub const PACKAGE_B: &str = r#"package b

type TestKind int

const (
	TestKindHoge TestKind = iota
	TestKindFuga
	TestKindPiyo
)
"#;

pub const PACKAGE_XA: &str = r#"package a

type TestKind int

const (
	TestKindHoge TestKind = iota
	TestKindFuga
	TestKindPiyo
	TestKindDoga
	TestKindBosukete
	TestKindXxx
	TestKindYyy
)
"#;

pub const PACKAGE_C: &str = r#"package c

import (
	"a"
	"b"
	xa "x/a"
)

type TestKind int

const (
	TestKindHoge TestKind = iota
	TestKindFuga
	TestKindPiyo
)

type TestKind2 int

const (
	TestKind2Hoge TestKind2 = iota
	TestKind2Fuga
	TestKind2Piyo
)

func c() {
	{
		var v TestKind

		// no annotation
		switch v {
		case TestKindHoge:
		}

		// switchchecker
		switch v {
		case TestKindHoge:
		case TestKindFuga:
		case TestKindPiyo:
		default:
		}

		// switchchecker
		switch v { // want "no case of c.TestKindPiyo"
		case TestKindHoge:
		case TestKindFuga:
		default:
		}

		// switchchecker -exclude TestKindHoge,TestKindFuga
		switch v { // want "no case of c.TestKindPiyo"
		default:
		}

		// switchchecker -e TestKindHoge,TestKindFuga
		switch v { // want "no case of c.TestKindPiyo"
		default:
		}
	}

	{
		var v a.TestKind

		// no annotation
		switch v {
		case a.TestKindHoge:
		}

		// switchchecker
		switch v {
		case a.TestKindHoge, a.TestKindFuga:
		case a.TestKindPiyo:
		default:
		}

		// switchchecker
		switch v { // want "no case of a.TestKindPiyo"
		case a.TestKindHoge:
		case a.TestKindFuga:
		default:
		}

		// switchchecker -exclude TestKindHoge,TestKindFuga
		switch v { // want "no case of a.TestKindPiyo"
		default:
		}

		// switchchecker -e TestKindHoge,TestKindFuga
		switch v { // want "no case of a.TestKindPiyo"
		default:
		}
	}

	{
		var v b.TestKind

		// switchchecker
		switch v { // want "no case of b.TestKindFuga, and b.TestKindPiyo"
		case b.TestKindHoge:
		default:
		}
	}

	{
		var v xa.TestKind

		// switchchecker
		switch v { // want "no case of x/a.TestKindDoga, x/a.TestKindBosukete, x/a.TestKindXxx, and more"
		case xa.TestKindHoge:
		case xa.TestKindFuga:
		case xa.TestKindPiyo:
		default:
		}
	}
}
"#;

/// Catalog exported by [`PACKAGE_C`].
pub const PACKAGE_C_FACTS: &str = "c.TestKind:[c.TestKindHoge c.TestKindFuga c.TestKindPiyo] \
c.TestKind2:[c.TestKind2Hoge c.TestKind2Fuga c.TestKind2Piyo]";
