use std::{env, process};

use expense_ledger::{cli, init};

fn main() {
    init();

    if let Err(err) = cli::run(env::args().skip(1)) {
        cli::output::error(&err);
        process::exit(1);
    }
}
