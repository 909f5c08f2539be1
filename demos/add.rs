//! Adds two numbers given on the command line.
//!
//! ```text
//! cargo run --example add -- -a 3 --second=4
//! cargo run --example add -- --help
//! ```

use std::{env, process::ExitCode};

use argtree::{
    Application,
    binder::{ConfigObject, Params},
    tracing_config,
};

#[derive(Default)]
struct Addition {
    first: i32,
    second: i32,
}

impl ConfigObject for Addition {
    fn type_name(&self) -> &str {
        "Addition"
    }

    fn description(&self) -> &str {
        "Adds two numbers and prints the result"
    }

    fn declare<'a>(&'a mut self, params: &mut Params<'a>) {
        params
            .value("first", Some('a'), &mut self.first, "The first summand.")
            .value("second", Some('b'), &mut self.second, "The second summand.");
    }
}

fn main() -> ExitCode {
    if let Err(e) = tracing_config::init() {
        eprintln!("{e}");
    }

    let mut add = Addition::default();
    let app = match Application::parse(&mut add, env::args()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if app.help_requested() {
        print!("{}", app.usage());
        return ExitCode::SUCCESS;
    }

    println!("{}", add.first + add.second);
    ExitCode::SUCCESS
}
