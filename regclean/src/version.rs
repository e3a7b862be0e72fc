/// Get the version string for regclean and libregclean
pub fn get_version_string() -> String {
    format!(
        "regclean {}\nlibregclean {}",
        env!("CARGO_PKG_VERSION"),
        libregclean::version()
    )
}

/// Print version information to stdout
pub fn print_version() {
    println!("{}", get_version_string());
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
