//! ledgermetrics - Export hledger data as OpenMetrics.

fn main() -> std::process::ExitCode {
    ledgermetrics::cmd::export::main()
}
