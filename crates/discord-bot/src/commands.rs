use serenity::builder::CreateApplicationCommands;

pub mod menu;

/// Register all slash commands the bot responds to.
pub fn register_commands(commands: &mut CreateApplicationCommands) -> &mut CreateApplicationCommands {
    commands.create_application_command(|command| {
        *command = menu::start_command();
        command
    });

    commands.create_application_command(|command| {
        *command = menu::bookings_command();
        command
    });

    commands
}
