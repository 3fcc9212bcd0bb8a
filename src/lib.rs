pub mod error;

pub mod service {
    pub mod traits {
        pub mod i_service;
    }
    pub mod codec;
    pub mod config_service;
    pub mod converter;
    pub mod file;
    pub mod path;
    pub mod reporter;
    pub mod validator;
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod facade {
    pub mod traits {
        pub mod i_conversion;
    }
    pub mod conversion_facade;
}

pub mod models {
    pub mod conversion;
    pub mod event;
    pub mod file;
    pub mod decoded;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod utils {
    pub mod utils;
}
