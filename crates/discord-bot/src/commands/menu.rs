use serenity::builder::CreateApplicationCommand;

pub const START: &str = "start";
pub const BOOKINGS: &str = "bookings";

/// `/start` opens the main menu
pub fn start_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name(START)
        .description("Open the nail salon booking menu")
        .dm_permission(true);

    command
}

/// `/bookings` lists the caller's upcoming appointments
pub fn bookings_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name(BOOKINGS)
        .description("Show your upcoming appointments")
        .dm_permission(true);

    command
}
