//! Terminal front end for the adventure.
//!
//! All game mechanics live in `aventura-core`; this binary only reads
//! lines, maps them onto commands, and prints the narratives back.

use std::io::{self, BufRead, Write};

use aventura_core::{Archetype, Character, Command, GameSession, LookTarget, SessionStatus};

const HELP: &str = "Commands: look [enemy], attack, move <direction>, strategy <name>, special, quit.";

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    writeln!(output, "==================================================")?;
    writeln!(output, "  Welcome to the adventure!")?;
    writeln!(output, "==================================================")?;

    let name = prompt(&mut input, &mut output, "Enter your character's name: ")?;
    let name = if name.is_empty() {
        "Adventurer".to_string()
    } else {
        name
    };
    let archetype = choose_archetype(&mut input, &mut output)?;

    let player = Character::create(archetype, name);
    let mut session = GameSession::new(player);

    writeln!(output, "\n{}", HELP)?;
    for entry in session.log() {
        writeln!(output, "{}", entry.description)?;
    }

    loop {
        writeln!(output, "\n---------- YOUR TURN ----------")?;
        if let Some(enemy) = session.enemy() {
            writeln!(output, "{}", enemy.sheet())?;
        }
        writeln!(output, "{}", session.player().sheet())?;

        let line = prompt(
            &mut input,
            &mut output,
            &format!("\n{} (health {})> ", session.player().name(), session.player().health()),
        )?;

        let Some(command) = parse_command(&line) else {
            writeln!(output, "Unknown command: '{}'. {}", line, HELP)?;
            continue;
        };

        let response = session.submit(command);
        writeln!(output, "\n{}", response.narrative)?;

        if response.status != SessionStatus::Ongoing {
            break;
        }
    }
    Ok(())
}

fn prompt(input: &mut impl BufRead, output: &mut impl Write, text: &str) -> io::Result<String> {
    write!(output, "{}", text)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn choose_archetype(input: &mut impl BufRead, output: &mut impl Write) -> io::Result<Archetype> {
    writeln!(output, "\nChoose your class:")?;
    writeln!(output, "1. Warrior")?;
    writeln!(output, "2. Mage")?;
    writeln!(output, "3. Rogue")?;
    loop {
        let choice = prompt(input, output, "Select an option (1, 2, 3): ")?;
        match choice.as_str() {
            "1" => return Ok(Archetype::Warrior),
            "2" => return Ok(Archetype::Mage),
            "3" => return Ok(Archetype::Rogue),
            _ => writeln!(output, "Invalid option. Try again.")?,
        }
    }
}

/// Map a line of input onto a command. `None` means the line did not
/// parse at all and no round should be consumed.
fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let action = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.to_lowercase());

    match action.as_str() {
        "look" | "mirar" => Some(Command::Look {
            target: match argument.as_deref() {
                Some("enemy") | Some("enemigo") => LookTarget::Enemy,
                _ => LookTarget::Yourself,
            },
        }),
        "attack" | "atacar" => Some(Command::Attack),
        // A bare "move" has nothing to act on; let the caller reprompt.
        "move" | "mover" => Some(Command::Move {
            direction: argument?,
        }),
        "strategy" | "estrategia" => Some(Command::ChangeStrategy {
            name: argument.unwrap_or_default(),
        }),
        "special" | "habilidad" => Some(Command::UseSpecialAbility),
        "quit" | "salir" => Some(Command::Quit),
        _ => None,
    }
}
