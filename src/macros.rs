// Only for patterns known at compile time
macro_rules! regex(
    ($s:expr) => (::regex::Regex::new($s).unwrap());
);
