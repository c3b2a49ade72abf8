use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tune_menu::collab::{LocalPlaylistStore, Router};
use tune_menu::core::{ActionOutcome, MenuServices, TileMenu, User};
use tune_menu::menu::{BACK_LABEL, MenuAction, SHARE_LABEL};
use tune_menu::model::PlayableItem;
use tune_menu::notify::ConsoleNotifier;
use tune_menu::queue::PlayerQueue;
use tune_menu::{config, logging};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliAction {
    Menu(MenuAction),
    Playlist,
}

#[derive(Debug, Default)]
struct CliArgs {
    item: Option<PathBuf>,
    action: Option<CliAction>,
    playlist: Option<String>,
    user: Option<String>,
    show: bool,
}

struct ConsoleRouter;

impl Router for ConsoleRouter {
    fn push(&self, route: &str) {
        println!("-> {route}");
    }
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    let paths = config::StatePaths::resolve()?;
    let _log_guard = logging::init_logging(paths.ensure_root()?)?;

    let Some(item_path) = args.item else {
        anyhow::bail!("--item is required");
    };
    let raw = std::fs::read_to_string(&item_path)
        .with_context(|| format!("failed to read item {}", item_path.display()))?;
    let item: PlayableItem = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse item {}", item_path.display()))?;

    let mut state = paths.load()?;
    let mut queue = PlayerQueue::from_persisted(&state);
    let store = Arc::new(LocalPlaylistStore::new(state.playlists.clone()));
    let services = MenuServices {
        notifier: Arc::new(ConsoleNotifier),
        router: Arc::new(ConsoleRouter),
        playlists: store.clone(),
    };

    let mut menu = TileMenu::new(item, services)
        .with_user(args.user.map(|name| User { name }))
        .with_playlists(state.playlist_summaries())
        .with_album_link(true)
        .with_login_route(&state.login_route);
    menu.present();

    if args.show {
        print_menu(&menu);
    }

    match args.action {
        Some(CliAction::Menu(action)) => {
            menu.dispatch(action, &mut queue);
        }
        Some(CliAction::Playlist) => {
            let Some(playlist_id) = args.playlist else {
                anyhow::bail!("--action playlist requires --playlist <id>");
            };
            if menu.toggle_playlist_dialog() == ActionOutcome::DialogOpened {
                let Some(choice) = menu
                    .playlist_choices()
                    .iter()
                    .find(|summary| summary.id == playlist_id)
                    .cloned()
                else {
                    anyhow::bail!("unknown playlist {playlist_id}");
                };
                futures::executor::block_on(
                    menu.add_to_playlist_and_wait(&choice.id, &choice.name),
                );
            }
        }
        None => {}
    }

    queue.write_to(&mut state);
    state.playlists = store.snapshot();
    paths.save(&state)
}

fn print_menu(menu: &TileMenu) {
    let header = menu.header();
    println!("{}", header.title);
    println!("{}", header.description);
    println!("{}", header.image);
    println!();
    for (_, label) in menu.actions() {
        println!("  {label}");
    }
    println!("  {SHARE_LABEL} >");
    println!("    < {BACK_LABEL}");

    let links = menu.links();
    println!();
    println!("  open: {}", links.item_url);
    if let Some(album) = &links.album_url {
        println!("  album: {album}");
    }
    for artist in &links.primary_artists {
        println!("  artist: {artist}");
    }
}

fn parse_action(value: &str) -> anyhow::Result<CliAction> {
    Ok(match value {
        "play" => CliAction::Menu(MenuAction::PlayNow),
        "queue" => CliAction::Menu(MenuAction::AddToQueue),
        "favourite" => CliAction::Menu(MenuAction::Favourite),
        "radio" => CliAction::Menu(MenuAction::PlayRadio),
        "playlist" => CliAction::Playlist,
        other => anyhow::bail!("unknown action {other}"),
    })
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            flag @ ("--item" | "--action" | "--playlist" | "--user") => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("{flag} requires a value");
                };
                let value = value.trim();
                if value.is_empty() {
                    anyhow::bail!("{flag} cannot be empty");
                }
                match flag {
                    "--item" => out.item = Some(PathBuf::from(value)),
                    "--action" => out.action = Some(parse_action(value)?),
                    "--playlist" => out.playlist = Some(value.to_string()),
                    _ => out.user = Some(value.to_string()),
                }
            }
            "--show" => out.show = true,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("tune-menu");
    println!("  --item file.json     Item to open the menu on");
    println!("  --action name        play | queue | favourite | radio | playlist");
    println!("  --playlist id        Target playlist for --action playlist");
    println!("  --user name          Act as a signed-in user");
    println!("  --show               Print the menu before acting");
}
