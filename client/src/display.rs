use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use shared::chat_message::ChatMessage;
use std::io::{Write, stdout};

pub const PROMPT_STR: &str = "> ";

pub struct ChatDisplay;

impl ChatDisplay {
    pub fn print_connected_message(server_addr: &str, username: &str) {
        println!("Connected to {} as '{}'!", server_addr, username);
    }

    pub fn print_lobby_help() {
        println!("Commands:");
        println!("  * join <room>");
        println!("  * exit");
    }

    pub fn print_prompt() -> std::io::Result<()> {
        print!("{}", PROMPT_STR);
        stdout().flush()
    }

    pub fn print_joined_room(room: &str) {
        println!("Joined '{}'. Type /leave to return to the lobby.", room);
    }

    pub fn print_left_room(room: &str) {
        println!("You have left '{}'", room);
    }

    pub fn print_chat_message(message: &ChatMessage) {
        let mut stdout = stdout();

        let _ = execute!(
            stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        );

        let _ = writeln!(
            stdout,
            "[{}] {}: {}",
            message.sent_at, message.author, message.body
        );
        let _ = stdout.flush();
    }

    pub fn print_own_message(message: &ChatMessage) {
        println!("[{}] you: {}", message.sent_at, message.body);
    }
}
