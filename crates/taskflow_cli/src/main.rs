use clap::{CommandFactory, Parser};
use flexi_logger::{Logger, LoggerHandle};
use std::io::{self, BufRead};
use std::str::FromStr;
use tabled::{Table, Tabled};
use taskflow_cli::cli::{Cli, Command, parse_due_argument};
use taskflow_core::clock::SystemClock;
use taskflow_core::error::AppError;
use taskflow_core::ids::NanoIdGenerator;
use taskflow_core::model::{Priority, Task};
use taskflow_core::notify::announcer_from_env;
use taskflow_core::session::Session;
use taskflow_core::storage::kv_store::FileStore;
use taskflow_core::task_api::{TaskDraft, TaskPatch};
use taskflow_core::view::{CategoryFilter, SortOrder, StatusFilter, ViewParams, task_overdue};
use time::OffsetDateTime;

type CliSession = Session<FileStore>;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "priority")]
    priority: String,
    #[tabled(rename = "due")]
    due: String,
    #[tabled(rename = "category")]
    category: String,
}

fn status_label(task: &Task, now: OffsetDateTime) -> String {
    match (task.completed, task_overdue(task, now)) {
        (true, _) => "completed".to_string(),
        (false, true) => "pending (overdue)".to_string(),
        (false, false) => "pending".to_string(),
    }
}

fn task_row(task: &Task, now: OffsetDateTime) -> TaskRow {
    TaskRow {
        id: task.id.clone(),
        title: task.title.clone(),
        status: status_label(task, now),
        priority: task.priority.to_string(),
        due: task.due_date.clone().unwrap_or_else(|| "-".to_string()),
        category: task.category.clone().unwrap_or_else(|| "-".to_string()),
    }
}

fn print_tasks_plain(tasks: &[Task], now: OffsetDateTime) {
    if tasks.is_empty() {
        println!("No matching tasks.");
        return;
    }
    let rows: Vec<TaskRow> = tasks.iter().map(|task| task_row(task, now)).collect();
    println!("{}", Table::new(rows));
}

fn print_task_json(task: &Task) -> Result<(), AppError> {
    let json =
        serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    let json =
        serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn open_session() -> Result<CliSession, AppError> {
    let store = FileStore::open_default()?;
    Ok(Session::open(
        store,
        Box::new(SystemClock),
        Box::new(NanoIdGenerator),
        announcer_from_env(),
    ))
}

fn run_command(session: &mut CliSession, cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Login { name } => {
            session.login(&name)?;
            let user = session.user().unwrap_or_default();
            if cli.json {
                println!("{}", serde_json::json!({ "user": user }));
            } else {
                println!("Signed in as {user}");
            }
        }
        Command::Logout => {
            session.logout();
            if cli.json {
                println!("{}", serde_json::json!({ "user": serde_json::Value::Null }));
            } else {
                println!("Signed out");
            }
        }
        Command::Whoami => {
            if cli.json {
                println!("{}", serde_json::json!({ "user": session.user() }));
            } else {
                match session.user() {
                    Some(user) => println!("{user}"),
                    None => println!("Not signed in"),
                }
            }
        }
        Command::Add {
            title,
            description,
            due,
            priority,
            category,
        } => {
            let draft = TaskDraft {
                title,
                description,
                due_date: due.as_deref().map(parse_due_argument).transpose()?,
                priority: priority.as_deref().map(Priority::from_str).transpose()?,
                category,
            };
            let task = session.create(draft)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::Edit {
            id,
            title,
            description,
            due,
            clear_due,
            priority,
            category,
            clear_category,
        } => {
            let due_date = if clear_due {
                Some(None)
            } else {
                due.as_deref()
                    .map(parse_due_argument)
                    .transpose()?
                    .map(Some)
            };
            let patch = TaskPatch {
                title,
                description,
                due_date,
                priority: priority.as_deref().map(Priority::from_str).transpose()?,
                category: if clear_category {
                    Some(None)
                } else {
                    category.map(Some)
                },
            };
            let task = session.update(&id, &patch)?;
            if cli.json {
                print_task_json(&task)?;
            } else {
                println!("Updated task: {} ({})", task.title, task.id);
            }
        }
        Command::Toggle { id } => {
            let completed = session.toggle(&id)?;
            if cli.json {
                if let Some(task) = session.task(&id) {
                    print_task_json(task)?;
                }
            } else if completed {
                println!("Completed task: {id}");
            } else {
                println!("Reopened task: {id}");
            }
        }
        Command::Delete { id } => {
            let removed = session.delete(&id);
            if cli.json {
                println!("{}", serde_json::json!({ "id": id, "removed": removed }));
            } else if removed {
                println!("Deleted task: {id}");
            } else {
                println!("No task with id {id}");
            }
        }
        Command::List {
            filter,
            search,
            category,
            sort,
        } => {
            let params = ViewParams {
                filter: StatusFilter::from_str(&filter)?,
                search,
                category: CategoryFilter::parse(&category),
                sort: SortOrder::from_str(&sort)?,
            };
            let tasks = session.visible(&params);
            if cli.json {
                print_tasks_json(&tasks)?;
            } else {
                print_tasks_plain(&tasks, OffsetDateTime::now_utc());
            }
        }
        Command::Stats => {
            let stats = session.stats();
            if cli.json {
                let json = serde_json::to_string(&stats)
                    .map_err(|err| AppError::invalid_data(err.to_string()))?;
                println!("{json}");
            } else {
                println!("Total:                 {}", stats.total);
                println!("Completed:             {}", stats.completed);
                println!("Pending:               {}", stats.pending);
                println!("Overdue:               {}", stats.overdue);
                println!("Completion rate:       {}%", stats.completion_rate);
                println!("High priority pending: {}", stats.high_priority_pending);
            }
        }
        Command::Reset => {
            session.reset();
            if cli.json {
                println!("{}", serde_json::json!({ "tasks": [] }));
            } else {
                println!("Task collection cleared");
            }
        }
    }

    Ok(())
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_interactive() -> Result<(), AppError> {
    let mut session = open_session()?;
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {err}");
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("taskflow".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(&mut session, cli) {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn init_logging() -> Option<LoggerHandle> {
    let logger = Logger::try_with_env_or_str("warn").ok()?;
    logger.log_to_stderr().start().ok()
}

fn main() {
    let _logger = init_logging();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if err.use_stderr() {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                std::process::exit(1);
            }
            // --help / --version render on stdout and exit cleanly.
            print!("{err}");
            return;
        }
    };

    let mut session = match open_session() {
        Ok(session) => session,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(&mut session, cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
