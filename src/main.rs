use std::process::ExitCode;

use webp2png::action::cli::process_args;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(code) => {
            log::debug!("程式執行完成");
            code
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("錯誤：{}", e);
            ExitCode::FAILURE
        }
    }
}
