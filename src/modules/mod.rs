pub mod relay;
pub mod models {
    pub mod port;
    pub mod vessel;
}

pub mod helpers {
    pub mod logging;

    pub mod fairings {
        pub mod cors;
    }
}
