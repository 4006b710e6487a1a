use anyhow::Context;
use forage_core::{
    CardDef, CardGroup, Catalog, ConditionKey, Conditions, DeckStats, Event, EventBus,
    InstanceRef, Resolution, Resource, ResourceVector, Tracker, THRESHOLDS,
};
use forage_data::{
    builtin_catalog_with_locale, group_title, load_catalog_dir_with_locale, normalize_locale,
};
use log::{debug, warn};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiLocale {
    EnUs,
    JaJp,
}

impl UiLocale {
    fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::JaJp => "ja_JP",
        }
    }

    fn from_opt(value: Option<&str>) -> Self {
        let normalized = normalize_locale(value.unwrap_or(""));
        if normalized == "ja_JP" {
            Self::JaJp
        } else {
            Self::EnUs
        }
    }

    fn text<'a>(self, en: &'a str, ja: &'a str) -> &'a str {
        if matches!(self, Self::JaJp) {
            ja
        } else {
            en
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    locale: UiLocale,
    catalog_dir: Option<PathBuf>,
    conditions: Conditions,
    show_help: bool,
}

fn parse_cli_options(args: &[String], env_locale: Option<String>) -> CliOptions {
    let mut locale_arg = env_locale;
    let mut catalog_dir = None;
    let mut conditions = Conditions::default();
    let mut show_help = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--help" | "-h" => show_help = true,
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    locale_arg = Some(value.clone());
                    idx += 1;
                }
            }
            "--catalog" => {
                if let Some(value) = args.get(idx + 1) {
                    catalog_dir = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--min-char" => conditions.is_min_char_player = true,
            "--higher-char" => conditions.has_higher_char_room_player = true,
            "--favorite" => {
                if let Some(value) = args.get(idx + 1) {
                    for part in value.split(',').filter(|part| !part.trim().is_empty()) {
                        match Resource::from_id(part) {
                            Some(resource) => conditions.favorite.set(resource, true),
                            None => warn!("ignoring unknown favorite resource '{}'", part),
                        }
                    }
                    idx += 1;
                }
            }
            other => warn!("ignoring unknown argument '{}'", other),
        }
        idx += 1;
    }
    CliOptions {
        locale: UiLocale::from_opt(locale_arg.as_deref()),
        catalog_dir,
        conditions,
        show_help,
    }
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_target(false)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args, std::env::var("FORAGE_LANG").ok());
    if options.show_help {
        print_usage(options.locale);
        return;
    }
    if let Err(err) = run(&options) {
        eprintln!("{}: {err:#}", options.locale.text("error", "エラー"));
        std::process::exit(1);
    }
}

fn load_catalog(options: &CliOptions) -> anyhow::Result<Catalog> {
    let locale = Some(options.locale.code());
    match &options.catalog_dir {
        Some(dir) => load_catalog_dir_with_locale(dir, locale)
            .with_context(|| format!("catalog directory {}", dir.display())),
        None => Ok(builtin_catalog_with_locale(locale)),
    }
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).ok()? == 0 {
        return None;
    }
    Some(line.trim_end_matches(&['\n', '\r'][..]).to_string())
}

fn run(options: &CliOptions) -> anyhow::Result<()> {
    let locale = options.locale;
    let catalog = load_catalog(options)?;
    debug!(
        "catalog loaded: {} card kinds, {} item kinds",
        catalog.cards.len(),
        catalog.items.len()
    );
    let mut tracker = Tracker::with_conditions(&catalog, options.conditions);
    let mut events = EventBus::default();

    println!("{}: {}", locale.text("locale", "言語"), locale.code());
    println!(
        "{}: {} / {}: {}",
        locale.text("cards", "カード"),
        catalog.deck_size(),
        locale.text("items", "アイテム"),
        catalog.pool_size()
    );
    print_help(locale);
    print_stats(locale, &tracker.resolve());

    while let Some(line) = read_line("> ") {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();
        debug!("command {} {:?}", cmd, args);
        let outcome = match cmd {
            "help" | "h" | "?" => {
                print_help(locale);
                Ok(false)
            }
            "quit" | "exit" | "q" => break,
            "stats" | "s" => {
                print_stats(locale, &tracker.resolve());
                Ok(false)
            }
            "passes" => {
                print_passes(locale, &tracker.resolve());
                Ok(false)
            }
            "deck" | "d" => {
                print_deck(locale, &tracker);
                Ok(false)
            }
            "items" | "i" => {
                print_items(locale, &tracker);
                Ok(false)
            }
            "conditions" | "c" => {
                print_conditions(locale, tracker.conditions());
                Ok(false)
            }
            "json" => serde_json::to_string_pretty(&tracker.resolve())
                .map(|json| {
                    println!("{json}");
                    false
                })
                .map_err(|err| err.to_string()),
            "draw" | "-" => adjust_card_command(&mut tracker, &args, -1, &mut events),
            "return" | "+" => adjust_card_command(&mut tracker, &args, 1, &mut events),
            "toggle" | "t" => parse_instance_args(&args).and_then(|instance| {
                let id = resolve_card_id(&catalog, &instance.id)?;
                tracker
                    .toggle_card(id, instance.index, &mut events)
                    .map(|_| true)
                    .ok_or_else(|| format!("no copy {} of {}", instance.index, id))
            }),
            "use" => item_command(&mut tracker, &args, -1, &mut events),
            "restore" => item_command(&mut tracker, &args, 1, &mut events),
            "toggle-item" | "ti" => parse_instance_args(&args).and_then(|instance| {
                let id = resolve_item_id(&catalog, &instance.id)?;
                tracker
                    .toggle_item(id, instance.index, &mut events)
                    .map(|_| true)
                    .ok_or_else(|| format!("no copy {} of {}", instance.index, id))
            }),
            "cond" => condition_command(&mut tracker, &args, &mut events),
            "fav" => favorite_command(&mut tracker, &args, &mut events),
            "season" | "reset" => Ok(tracker.reset_season(&mut events)),
            "reset-items" => Ok(tracker.reset_items(&mut events)),
            _ => Err(format!("unknown command '{cmd}'")),
        };
        match outcome {
            Ok(changed) => {
                drain_events(locale, &catalog, &mut events);
                if changed {
                    print_stats(locale, &tracker.resolve());
                }
            }
            Err(err) => println!("{}: {}", locale.text("error", "エラー"), err),
        }
    }
    Ok(())
}

fn adjust_card_command(
    tracker: &mut Tracker<'_>,
    args: &[&str],
    sign: i32,
    events: &mut EventBus,
) -> Result<bool, String> {
    let token = args.first().ok_or("missing card id")?;
    let id = resolve_card_id(tracker.catalog(), token)?;
    let count = match args.get(1) {
        Some(value) => parse_count(value)?,
        None => 1,
    };
    if tracker.adjust_card(id, sign * count, events) {
        Ok(true)
    } else {
        Err(format!("cannot move {count} copies of {id}"))
    }
}

fn item_command(
    tracker: &mut Tracker<'_>,
    args: &[&str],
    delta: i32,
    events: &mut EventBus,
) -> Result<bool, String> {
    let token = args.first().ok_or("missing item id")?;
    let id = resolve_item_id(tracker.catalog(), token)?;
    if tracker.adjust_item(id, delta, events) {
        Ok(true)
    } else if delta < 0 {
        Err(format!("no {id} left to use"))
    } else {
        Err(format!("every {id} is already available"))
    }
}

fn condition_command(
    tracker: &mut Tracker<'_>,
    args: &[&str],
    events: &mut EventBus,
) -> Result<bool, String> {
    let key = parse_condition_key(args.first().ok_or("missing condition")?)?;
    match args.get(1) {
        Some(value) => Ok(tracker.set_condition(key, parse_bool(value)?, events)),
        None => {
            tracker.toggle_condition(key, events);
            Ok(true)
        }
    }
}

fn favorite_command(
    tracker: &mut Tracker<'_>,
    args: &[&str],
    events: &mut EventBus,
) -> Result<bool, String> {
    let token = args.first().ok_or("missing resource")?;
    let resource = Resource::from_id(token).ok_or_else(|| format!("unknown resource '{token}'"))?;
    match args.get(1) {
        Some(value) => Ok(tracker.set_favorite(resource, parse_bool(value)?, events)),
        None => {
            tracker.toggle_favorite(resource, events);
            Ok(true)
        }
    }
}

fn parse_count(value: &str) -> Result<i32, String> {
    match value.parse::<i32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(format!("invalid count '{value}'")),
    }
}

/// Accepts `<id>__<index>` or `<id> <index>`.
fn parse_instance_args(args: &[&str]) -> Result<InstanceRef, String> {
    match args {
        [single] => single.parse::<InstanceRef>(),
        [id, index] => index
            .parse::<u32>()
            .map(|index| InstanceRef::new(*id, index))
            .map_err(|_| format!("invalid index '{index}'")),
        _ => Err("expected <id> <index>".to_string()),
    }
}

/// Exact id, or a prefix that matches a single id.
fn resolve_id<'a>(ids: impl Iterator<Item = &'a str>, token: &str) -> Result<&'a str, String> {
    let mut matches = Vec::new();
    for id in ids {
        if id == token {
            return Ok(id);
        }
        if id.starts_with(token) {
            matches.push(id);
        }
    }
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(format!("unknown id '{token}'")),
        _ => Err(format!("ambiguous id '{token}': {}", matches.join(", "))),
    }
}

fn resolve_card_id<'a>(catalog: &'a Catalog, token: &str) -> Result<&'a str, String> {
    resolve_id(catalog.cards.iter().map(|card| card.id.as_str()), token)
}

fn resolve_item_id<'a>(catalog: &'a Catalog, token: &str) -> Result<&'a str, String> {
    resolve_id(catalog.items.iter().map(|item| item.id.as_str()), token)
}

fn parse_condition_key(value: &str) -> Result<ConditionKey, String> {
    match value.trim().to_lowercase().replace('-', "_").as_str() {
        "min" | "min_char" | "is_min_char_player" => Ok(ConditionKey::IsMinCharPlayer),
        "higher" | "higher_char" | "has_higher_char_room_player" => {
            Ok(ConditionKey::HasHigherCharRoomPlayer)
        }
        _ => Err(format!("unknown condition '{value}'")),
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    let value = value.trim().to_lowercase();
    match value.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(format!("invalid boolean '{value}'")),
    }
}

fn print_usage(locale: UiLocale) {
    println!("forage-cli [--lang en_US|ja_JP] [--catalog DIR] [--min-char] [--higher-char]");
    println!("           [--favorite fruit,meat,fish]");
    println!(
        "{}",
        locale.text(
            "Interactive deck counter. RUST_LOG controls diagnostics, FORAGE_LANG the locale.",
            "対話式のデッキカウンター。RUST_LOG で診断出力、FORAGE_LANG で言語を指定します。"
        )
    );
}

fn print_help(locale: UiLocale) {
    println!("{}", locale.text("Commands:", "コマンド："));
    let rows: [(&str, &str, &str); 17] = [
        ("help|h|?", "show help", "ヘルプを表示"),
        ("stats|s", "current statistics", "現在の統計"),
        ("passes", "every evaluation pass", "すべての評価パス"),
        ("deck|d", "cards and copies left", "カードと残り枚数"),
        ("items|i", "items and copies left", "アイテムと残り枚数"),
        ("conditions|c", "table conditions", "卓の条件"),
        ("draw|- <card> [n]", "mark copies as drawn", "引いたカードを記録"),
        ("return|+ <card> [n]", "put copies back", "カードを戻す"),
        ("toggle|t <card> <i>", "flip one copy", "1枚を切り替え"),
        ("use <item>", "mark an item as used", "アイテムを使用済みにする"),
        ("restore <item>", "put an item back", "アイテムを戻す"),
        ("toggle-item|ti <item> <i>", "flip one item copy", "アイテム1枚を切り替え"),
        ("cond min|higher [on|off]", "set a condition", "条件を設定"),
        ("fav fruit|meat|fish [on|off]", "set a favorite food", "好物を設定"),
        ("season|reset", "put every card back", "全カードを山札に戻す"),
        ("reset-items", "put every item back", "全アイテムを戻す"),
        ("json", "dump the evaluation as JSON", "評価結果を JSON で出力"),
    ];
    for (usage, en, ja) in rows {
        println!("  {usage:<30} {}", locale.text(en, ja));
    }
    println!("  {:<30} {}", "quit|exit|q", locale.text("exit", "終了"));
}

fn resource_label(locale: UiLocale, resource: Resource) -> &'static str {
    match resource {
        Resource::Fruit => locale.text("fruit", "果物"),
        Resource::Meat => locale.text("meat", "お肉"),
        Resource::Fish => locale.text("fish", "お魚"),
    }
}

fn format_percentage(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

fn format_vector(locale: UiLocale, vector: ResourceVector) -> String {
    Resource::ALL
        .iter()
        .map(|resource| {
            format!(
                "{} {:.2}",
                resource_label(locale, *resource),
                vector.get(*resource)
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn print_stats(locale: UiLocale, resolution: &Resolution) {
    let stats = &resolution.stats;
    println!(
        "{}: {}",
        locale.text("cards left", "残りカード"),
        stats.total_cards
    );
    println!(
        "  {}: {} ({})",
        locale.text("item discovery", "アイテム発見"),
        stats.item_count,
        format_percentage(stats.item_probability)
    );
    println!(
        "  {}: {} ({})",
        locale.text("extra action", "再行動"),
        stats.extra_action_count,
        format_percentage(stats.extra_action_probability)
    );
    println!("{}", locale.text("Expected per draw:", "1回あたりの期待値："));
    println!(
        "  {:<8} {}",
        locale.text("base", "基本"),
        format_vector(locale, stats.expectation_base)
    );
    println!(
        "  {:<8} {}",
        locale.text("final", "最終"),
        format_vector(locale, stats.expectation_final)
    );
    println!(
        "  {:<8} {:.2}",
        locale.text("food", "食材"),
        stats.food_expectation
    );
    println!(
        "{} ({}):",
        locale.text("At least", "以上の確率"),
        THRESHOLDS
            .iter()
            .map(|threshold| threshold.to_string())
            .collect::<Vec<_>>()
            .join(" / ")
    );
    for resource in Resource::ALL {
        let row = stats.resource_at_least.row(resource);
        println!(
            "  {:<8} {}",
            resource_label(locale, resource),
            row.iter()
                .map(|probability| format_percentage(*probability))
                .collect::<Vec<_>>()
                .join(" / ")
        );
    }
    println!(
        "{}: {} / {}: {:.2}",
        locale.text("items left", "残りアイテム"),
        resolution.items.remaining,
        locale.text("expected food per item", "アイテム期待食材"),
        resolution.items.expected_food_gain
    );
}

fn print_pass(locale: UiLocale, label: &str, stats: &DeckStats) {
    println!(
        "  {:<20} {} {:>3}  {} {:.3}  {}",
        label,
        locale.text("cards", "枚"),
        stats.total_cards,
        locale.text("food", "食材"),
        stats.food_expectation,
        format_vector(locale, stats.expectation_final)
    );
}

fn print_passes(locale: UiLocale, resolution: &Resolution) {
    print_pass(
        locale,
        locale.text("season baseline", "季節基準"),
        &resolution.season_baseline,
    );
    print_pass(
        locale,
        locale.text("without items", "アイテムなし"),
        &resolution.without_items,
    );
    println!(
        "  {:<20} {} {:>3}  {} {:.3}",
        locale.text("items", "アイテム"),
        locale.text("left", "残"),
        resolution.items.remaining,
        locale.text("food", "食材"),
        resolution.items.expected_food_gain
    );
    print_pass(
        locale,
        locale.text("season with items", "季節（アイテム込）"),
        &resolution.season_with_items,
    );
    print_pass(locale, locale.text("final", "最終"), &resolution.stats);
}

fn instance_markers(states: impl Iterator<Item = (u32, bool)>) -> String {
    states
        .map(|(_, present)| if present { '#' } else { '.' })
        .collect()
}

fn print_card_line(locale: UiLocale, tracker: &Tracker<'_>, card: &CardDef, food: Option<f64>) {
    let cards = tracker.cards();
    let mut line = format!(
        "  {:<24} [{}] {}/{}  {}",
        card.id,
        instance_markers(cards.instances(&card.id)),
        cards.count(&card.id),
        card.quantity,
        card.name
    );
    if let Some(food) = food {
        line.push_str(&format!("  +{food:.2}"));
    }
    if card.flags.draw_again || card.flags.bonus_action {
        line.push_str(locale.text("  (draws again)", "  (もう1枚)"));
    }
    println!("{line}");
}

fn print_deck(locale: UiLocale, tracker: &Tracker<'_>) {
    let resolution = tracker.resolve();
    for group in CardGroup::ALL {
        let mut cards = tracker.catalog().cards_in_group(group).peekable();
        if cards.peek().is_none() {
            continue;
        }
        println!("{}", group_title(group, locale.code()));
        for card in cards {
            let food = resolution
                .stats
                .immediate_gains
                .get(&card.id)
                .map(|gain| gain.food);
            print_card_line(locale, tracker, card, food);
        }
    }
}

fn print_items(locale: UiLocale, tracker: &Tracker<'_>) {
    let items = tracker.items();
    for item in &tracker.catalog().items {
        let effect = if item.extra_draws > 0 {
            format!("{} +{}", locale.text("draws", "ドロー"), item.extra_draws)
        } else {
            format!("{} +{}", locale.text("food", "食材"), item.food_gain)
        };
        println!(
            "  {:<20} [{}] {}/{}  {}  {}",
            item.id,
            instance_markers(items.presence().instances(&item.id)),
            items.available(item),
            item.quantity,
            item.name,
            effect
        );
    }
}

fn on_off(locale: UiLocale, value: bool) -> &'static str {
    if value {
        locale.text("on", "オン")
    } else {
        locale.text("off", "オフ")
    }
}

fn condition_label(locale: UiLocale, key: ConditionKey) -> &'static str {
    match key {
        ConditionKey::IsMinCharPlayer => locale.text("fewest characters", "最少キャラ"),
        ConditionKey::HasHigherCharRoomPlayer => {
            locale.text("room character gap", "キャラ部屋合計格差")
        }
    }
}

fn print_conditions(locale: UiLocale, conditions: &Conditions) {
    for key in ConditionKey::ALL {
        println!(
            "  {:<24} {}",
            condition_label(locale, key),
            on_off(locale, conditions.is_satisfied(key))
        );
    }
    let favorites: Vec<&str> = Resource::ALL
        .iter()
        .filter(|resource| conditions.favorite.is_selected(**resource))
        .map(|resource| resource_label(locale, *resource))
        .collect();
    println!(
        "  {:<24} {}",
        locale.text("favorite foods", "好物"),
        if favorites.is_empty() {
            locale.text("none", "なし").to_string()
        } else {
            favorites.join(", ")
        }
    );
}

fn drain_events(locale: UiLocale, catalog: &Catalog, events: &mut EventBus) {
    for event in events.drain() {
        println!(
            "{}: {}",
            locale.text("event", "イベント"),
            format_event(locale, catalog, &event)
        );
    }
}

fn card_name<'a>(catalog: &'a Catalog, id: &'a str) -> &'a str {
    catalog.card(id).map(|card| card.name.as_str()).unwrap_or(id)
}

fn item_name<'a>(catalog: &'a Catalog, id: &'a str) -> &'a str {
    catalog.item(id).map(|item| item.name.as_str()).unwrap_or(id)
}

fn format_event(locale: UiLocale, catalog: &Catalog, event: &Event) -> String {
    match event {
        Event::CardToggled { id, index, present } => format!(
            "{} #{index}: {}",
            card_name(catalog, id),
            if *present {
                locale.text("back in deck", "山札に戻した")
            } else {
                locale.text("drawn", "引いた")
            }
        ),
        Event::CardAdjusted { id, remaining } => format!(
            "{}: {} {remaining}",
            card_name(catalog, id),
            locale.text("left", "残り")
        ),
        Event::ItemToggled {
            id,
            index,
            available,
        } => format!(
            "{} #{index}: {}",
            item_name(catalog, id),
            if *available {
                locale.text("available", "未使用")
            } else {
                locale.text("used", "使用済み")
            }
        ),
        Event::ItemAdjusted { id, available } => format!(
            "{}: {} {available}",
            item_name(catalog, id),
            locale.text("available", "残り")
        ),
        Event::ConditionChanged { key, value } => format!(
            "{}: {}",
            condition_label(locale, *key),
            on_off(locale, *value)
        ),
        Event::FavoriteChanged { resource, selected } => format!(
            "{} {}: {}",
            locale.text("favorite", "好物"),
            resource_label(locale, *resource),
            on_off(locale, *selected)
        ),
        Event::SeasonReset { remaining } => format!(
            "{} ({remaining})",
            locale.text("season reset, every card is back", "季節の変わり目：全カードが戻りました")
        ),
        Event::ItemsReset { remaining } => format!(
            "{} ({remaining})",
            locale.text("items reset", "アイテムをリセット")
        ),
    }
}
