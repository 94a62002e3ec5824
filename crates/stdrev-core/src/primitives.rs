//! # Innate Primitives
//!
//! Hardcoded constants for the stdrev CORE.
//!
//! The classifier starts with fixed knowledge of the toolchain macros that
//! carry conformance information and of the token values each standard
//! mandates. These are compiled in and immutable at runtime; everything that
//! varies per vendor or dialect lives in the quirks table instead.

// =============================================================================
// INDICATOR NAMES
// =============================================================================

/// Defined by every conforming C implementation since ANSI X3.159-1989.
pub const STDC: &str = "__STDC__";

/// Version macro of the C family. Introduced by ISO/IEC 9899-1:1994.
pub const STDC_VERSION: &str = "__STDC_VERSION__";

/// Hosted-environment macro. First appeared in C99.
pub const STDC_HOSTED: &str = "__STDC_HOSTED__";

/// Presence and version macro of the C++ family.
pub const CPLUSPLUS: &str = "__cplusplus";

/// C++/CLI (ECMA-372) extension is active.
pub const CPLUSPLUS_CLI: &str = "__cplusplus_cli";

/// C++/CX windowing-runtime extension is active.
pub const CPLUSPLUS_WINRT: &str = "__cplusplus_winrt";

/// Embedded C++ subset is active.
pub const EMBEDDED_CPLUSPLUS: &str = "__embedded_cplusplus";

// =============================================================================
// VERSION TOKEN THRESHOLDS
// =============================================================================

/// `__STDC_VERSION__` for ISO/IEC 9899-1:1994 (C94 / AMD1).
pub const C94_TOKEN: u32 = 199_409;
/// `__STDC_VERSION__` for ISO/IEC 9899:1999.
pub const C99_TOKEN: u32 = 199_901;
/// `__STDC_VERSION__` for ISO/IEC 9899:2011.
pub const C11_TOKEN: u32 = 201_112;
/// `__STDC_VERSION__` for ISO/IEC 9899:2018.
pub const C17_TOKEN: u32 = 201_710;
/// `__STDC_VERSION__` for ISO/IEC 9899:2024.
pub const C23_TOKEN: u32 = 202_311;

/// `__cplusplus` for ISO/IEC 14882:1998 (and 2003, which kept the value).
pub const CPP98_TOKEN: u32 = 199_711;
/// `__cplusplus` for ISO/IEC 14882:2011.
pub const CPP11_TOKEN: u32 = 201_103;
/// `__cplusplus` for ISO/IEC 14882:2014.
pub const CPP14_TOKEN: u32 = 201_402;
/// `__cplusplus` for ISO/IEC 14882:2017.
pub const CPP17_TOKEN: u32 = 201_703;
/// `__cplusplus` for ISO/IEC 14882:2020.
pub const CPP20_TOKEN: u32 = 202_002;
/// `__cplusplus` for ISO/IEC 14882:2024.
pub const CPP23_TOKEN: u32 = 202_302;

// =============================================================================
// VENDOR QUIRKS
// =============================================================================

/// Vendor identifier of the HP aC++ toolchain.
pub const HP_ACC_VENDOR: &str = "hp-acc";

/// Token HP aC++ reports for its pre-2011 C++ support, one below [`CPP98_TOKEN`].
pub const HP_ACC_CPP98_TOKEN: u32 = CPP98_TOKEN - 1;

// =============================================================================
// DIALECT NAMES
// =============================================================================

/// Dialect name for C++/CLI.
pub const DIALECT_CLI: &str = "cli";
/// Dialect name for C++/CX.
pub const DIALECT_WINRT: &str = "winrt";
/// Dialect name for Embedded C++.
pub const DIALECT_EMBEDDED: &str = "embedded";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_thresholds_strictly_increase() {
        let tokens = [C94_TOKEN, C99_TOKEN, C11_TOKEN, C17_TOKEN, C23_TOKEN];
        assert!(tokens.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn cpp_thresholds_strictly_increase() {
        let tokens = [
            CPP98_TOKEN,
            CPP11_TOKEN,
            CPP14_TOKEN,
            CPP17_TOKEN,
            CPP20_TOKEN,
            CPP23_TOKEN,
        ];
        assert!(tokens.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn hp_token_is_one_below_standard() {
        assert_eq!(HP_ACC_CPP98_TOKEN + 1, CPP98_TOKEN);
    }
}
