use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use kisscmd_tnc::TncCommand;

/// Command table appended to `--help` and to the bare-invocation usage.
pub fn command_table() -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["COMMAND", "VALUE", "REPLY", "DESCRIPTION"]);

    for cmd in TncCommand::ALL {
        table.add_row(vec![
            cmd.name(),
            cmd.value_hint(),
            if cmd.expects_reply() { "yes" } else { "" },
            cmd.description(),
        ]);
    }

    format!("Available commands:\n{table}")
}
