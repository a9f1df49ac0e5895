//! Library integration tests.

use gearplan::GearplanError;

#[test]
fn error_types_are_public() {
    let err = GearplanError::GearsetNotFound {
        name: "Savage".into(),
    };
    assert!(err.to_string().contains("Savage"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> gearplan::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use gearplan::cli::{Cli, Commands};

    let cli = Cli::parse_from(["gearplan", "status", "--json"]);
    if let Some(Commands::Status(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Status command");
    }
}

#[test]
fn ui_types_are_public() {
    use gearplan::ui::{MockUI, OutputMode, UserInterface};

    let mut ui = MockUI::with_mode(OutputMode::Quiet);
    ui.warning("careful");
    assert_eq!(ui.output_mode(), OutputMode::Quiet);
    assert!(ui.has_warning("careful"));
}
