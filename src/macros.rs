#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:literal
        $(, buckets: $buckets:expr)?
        , prod: |$groups:ident : &[String]| -> $ret_ty:ty $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            pattern: $crate::regex!($pat),
            production: Box::new(move |$groups: &[String]| {
                let result: $ret_ty = $body;
                result
            }),
            buckets: { 0 $(| $buckets)? },
        }
    }};
}
