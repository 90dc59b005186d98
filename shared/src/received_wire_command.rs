use crate::wire_command::WireCommand;

#[derive(Debug)]
pub enum ReceivedWireCommand {
    EOF,
    Command(WireCommand),
}
