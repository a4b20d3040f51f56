//! Configuration options for scan simulation.
//!
//! [`ScanfOptions`] controls the names the simulator puts into the
//! declarations it builds. It does not change matching.
//!
//! ## Examples
//!
//! ```rust
//! use scanf_sim::{sscanf_with_options, ScanfOptions};
//!
//! let options = ScanfOptions::new().with_alloc_function("g_strdup");
//! let result = sscanf_with_options("%ms", "hello", &options).unwrap();
//! let arg = result.args.get(0).unwrap();
//! assert_eq!(arg.declaration("name"), "char *name = g_strdup(\"hello\");");
//! ```

/// Configuration options for [`simulate_with_options`](crate::simulate_with_options).
///
/// # Examples
///
/// ```rust
/// use scanf_sim::ScanfOptions;
///
/// let options = ScanfOptions::new();
/// assert_eq!(options.alloc_function, "strdup");
/// assert_eq!(options.wide_alloc_function, "wcsdup");
/// assert_eq!(options.wide_char_type, "wchar_t");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanfOptions {
    /// Function that duplicates a narrow string for `%ms`, `%mc` and `%m[`.
    pub alloc_function: String,
    /// Function that duplicates a wide string for `%mls`, `%mlc` and `%ml[`.
    pub wide_alloc_function: String,
    /// Typedef used for wide character deposits.
    pub wide_char_type: String,
}

impl Default for ScanfOptions {
    fn default() -> Self {
        ScanfOptions {
            alloc_function: "strdup".to_string(),
            wide_alloc_function: "wcsdup".to_string(),
            wide_char_type: "wchar_t".to_string(),
        }
    }
}

impl ScanfOptions {
    /// Creates default options (`strdup`, `wcsdup`, `wchar_t`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the narrow string allocation function.
    #[must_use]
    pub fn with_alloc_function(mut self, name: &str) -> Self {
        self.alloc_function = name.to_string();
        self
    }

    /// Sets the wide string allocation function.
    #[must_use]
    pub fn with_wide_alloc_function(mut self, name: &str) -> Self {
        self.wide_alloc_function = name.to_string();
        self
    }

    /// Sets the wide character typedef.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scanf_sim::ScanfOptions;
    ///
    /// let options = ScanfOptions::new().with_wide_char_type("char32_t");
    /// assert_eq!(options.wide_char_type, "char32_t");
    /// ```
    #[must_use]
    pub fn with_wide_char_type(mut self, name: &str) -> Self {
        self.wide_char_type = name.to_string();
        self
    }
}
