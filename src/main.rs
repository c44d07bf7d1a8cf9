// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use chain_probe::app::config::ProbeSettings;
use chain_probe::app::logging::setup_logging;
use chain_probe::common::constants::DEFAULT_FUNCTION;
use chain_probe::data::abi::render_outputs;
use chain_probe::domain::error::AppError;
use chain_probe::network::contract::ContractBinding;
use chain_probe::network::provider::Connection;
use clap::Parser;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Read chain head and call a view function on a deployed contract"
)]
struct Cli {
    /// Path to config file (default: ./config.toml if present)
    #[arg(long)]
    config: Option<String>,

    /// JSON-RPC endpoint (overrides config/env)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Contract address, 0x-prefixed
    #[arg(long)]
    contract: Option<String>,

    /// Path to an ABI JSON file or compiler artifact
    #[arg(long)]
    abi: Option<String>,

    /// Function to call
    #[arg(long)]
    function: Option<String>,

    /// Function argument; repeat for each input in declaration order
    #[arg(long = "arg")]
    args: Vec<String>,

    /// Debug-level logging
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Emit logs as JSON
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

impl Cli {
    fn apply(self, settings: &mut ProbeSettings) {
        if let Some(url) = self.rpc_url {
            settings.rpc_url = url;
        }
        if let Some(contract) = self.contract {
            settings.contract_address = contract;
        }
        if let Some(abi) = self.abi {
            settings.abi_path = Some(abi);
        }
        if let Some(function) = self.function {
            settings.function = function;
        }
        if !self.args.is_empty() {
            settings.args = self.args;
        }
        settings.debug |= self.debug;
        settings.log_json |= self.json_logs;
    }
}

/// Status line for the decoded result. The default `getInfo` demo keeps the
/// `Contract Info` wording.
fn result_line(function: &str, rendered: &str) -> String {
    if function == DEFAULT_FUNCTION {
        format!("Contract Info: {rendered}")
    } else {
        format!("Contract {function}: {rendered}")
    }
}

/// Process exit status: 0 when every step succeeded, 1 once any step failed.
fn exit_status(result: &Result<(), AppError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// connect → check → head → bind → call, strictly in order.
///
/// The first failing step ends the run and no later request is sent. `main`
/// prints it as `An error occurred: <msg>` on stdout and exits with status 1,
/// whichever step failed (contract call included).
async fn run(settings: &ProbeSettings) -> Result<(), AppError> {
    let connection = Connection::connect(&settings.rpc_url).await?;
    if connection.is_connected().await {
        println!("Connected to {} Block Chain", settings.chain_name);
    } else {
        println!("Connection failed");
    }

    let latest_block = connection.latest_block_number().await?;
    println!("Latest Block: {latest_block}");

    let descriptor = settings.interface_descriptor()?;
    let contract = ContractBinding::bind(&connection, &settings.contract_address, descriptor)?;
    tracing::debug!(
        target: "contract",
        endpoint = %connection.endpoint(),
        address = %contract.address(),
        "Calling {}",
        settings.function
    );
    let args = contract.coerce_args(&settings.function, &settings.args)?;
    let outputs = contract
        .call_read_function(&settings.function, &args)
        .await?;
    println!("{}", result_line(&settings.function, &render_outputs(&outputs)));

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match ProbeSettings::load_with_path(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("An error occurred: {e}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut settings);
    setup_logging(&settings.log_filter(), settings.log_json);

    tracing::info!(
        target: "config",
        rpc = %settings.rpc_url,
        contract = %settings.contract_address,
        function = %settings.function,
        args = settings.args.len(),
        "Starting probe"
    );

    let result = run(&settings).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Probe failed");
        println!("An error occurred: {e}");
    }
    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_function_keeps_contract_info_wording() {
        assert_eq!(result_line("getInfo", "hello"), "Contract Info: hello");
        assert_eq!(result_line("balanceOf", "5000"), "Contract balanceOf: 5000");
    }

    #[test]
    fn any_failed_step_exits_with_status_one() {
        assert_eq!(exit_status(&Ok(())), 0);
        for err in [
            AppError::Connection("refused".to_string()),
            AppError::Rpc("execution reverted".to_string()),
            AppError::FunctionNotFound("doesNotExist".to_string()),
        ] {
            assert_eq!(exit_status(&Err(err)), 1);
        }
    }
}
