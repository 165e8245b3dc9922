//! Scene-level tests driving the composer against the headless context

mod composer_lifecycle;
