#[macro_export]
macro_rules! arc_slice {
    [$($x:expr),*] => {
        $crate::utils::ArcSlice::from(vec![$($x.into()),*])
    };
}

#[macro_export]
macro_rules! arc_str {
    ($x:expr) => {
        $crate::utils::ArcStr::from($x)
    };
}
