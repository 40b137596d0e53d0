pub mod error;

pub mod service {
    pub mod combine;
    pub mod config_service;
    pub mod conversion_service;
    pub mod file;
    pub mod render;
    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
    pub mod interactive;
}

pub mod facade {
    pub mod conversion_facade;
    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod models {
    pub mod conversion;
    pub mod file;
    pub mod format;
    pub mod progress;
}

pub mod converters {
    pub mod copy;
    pub mod document;
    pub mod office;
    pub mod presentation;
    pub mod raster;
    pub mod spreadsheet;
}

pub mod utils {
    pub mod pdf;
    pub mod text;
    pub mod utils;
}
