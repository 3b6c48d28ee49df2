use gql_bootstrap::{cli, ui::output};

fn main() {
    let code = match cli::run() {
        Ok(code) => code,
        Err(err) => {
            output::error(format!("{:#}", err));
            cli::EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
