//! Command execution. Every command goes through the [`Store`]; this module
//! only reads its projections and prints them.

use anyhow::{anyhow, bail, Result};
use tracing::info;
use trainerdex_core::{
    store::CollectionStatus, CalculatedStats, Gender, Level, LoadState, NewTeamMember,
    SpeciesQuery, Stat, Store, TeamMember, TeamMemberUpdate, Trainer, TrainerPayload,
};

use crate::cli::{Command, SpeciesArgs, TeamCommand, TrainerCommand, TrainerFields};

pub async fn run(store: &Store, command: Command) -> Result<()> {
    match command {
        Command::Trainers(command) => trainers(store, command).await,
        Command::Team(command) => team(store, command).await,
        Command::Species(args) => species(store, args).await,
        Command::Preview { species_id, level } => preview(store, species_id, level).await,
    }
}

async fn trainers(store: &Store, command: TrainerCommand) -> Result<()> {
    match command {
        TrainerCommand::List => {
            store.fetch_trainers().await;
            ensure_ready(store.trainers_status(), "trainers")?;
            if !store.has_trainers() {
                println!("No trainers yet.");
            }
            for trainer in store.trainers() {
                println!("{}", trainer_line(&trainer));
            }
        }
        TrainerCommand::Show { id } => {
            let trainer = store
                .fetch_trainer(id)
                .await
                .ok_or_else(|| last_error(store, "failed to fetch trainer"))?;
            println!("{}", trainer_line(&trainer));
        }
        TrainerCommand::Add(fields) => {
            let trainer = store.create_trainer(payload(fields)?).await?;
            info!("created trainer {}", trainer.id);
            println!("Created {}", trainer_line(&trainer));
        }
        TrainerCommand::Update { id, fields } => {
            store.fetch_trainers().await;
            let trainer = store.update_trainer(id, payload(fields)?).await?;
            println!("Updated {}", trainer_line(&trainer));
        }
        TrainerCommand::Delete { id } => {
            store.fetch_trainers().await;
            let name = store
                .trainer_by_id(id)
                .map(|trainer| trainer.name)
                .unwrap_or_else(|| format!("#{id}"));
            store.delete_trainer(id).await?;
            println!("Deleted trainer {name}; {} remaining.", store.trainers().len());
        }
    }
    Ok(())
}

async fn team(store: &Store, command: TeamCommand) -> Result<()> {
    match command {
        TeamCommand::List { trainer_id } => {
            store.fetch_species(None).await;
            store.fetch_team(trainer_id).await;
            ensure_ready(store.team_status(), "team")?;
            let team = store.team();
            if team.is_empty() {
                println!("No Pokémon found for this trainer.");
            }
            for member in &team {
                println!("{}", member_line(store, member));
            }
        }
        TeamCommand::Add {
            trainer_id,
            species_id,
            level,
            nickname,
        } => {
            store.fetch_species(None).await;
            store.fetch_team(trainer_id).await;
            let mut payload = NewTeamMember::new(species_id, level);
            payload.nickname = nickname;
            let member = store.add_team_member(trainer_id, payload).await?;
            println!("Added {}", member_line(store, &member));
            println!("Team size: {}", store.team().len());
        }
        TeamCommand::Update {
            trainer_id,
            member_id,
            level,
            nickname,
        } => {
            store.fetch_species(None).await;
            store.fetch_team(trainer_id).await;
            let member = store
                .update_team_member(trainer_id, member_id, TeamMemberUpdate::new(nickname, level))
                .await?;
            println!("Updated {}", member_line(store, &member));
        }
        TeamCommand::Remove {
            trainer_id,
            member_id,
        } => {
            store.fetch_team(trainer_id).await;
            store.delete_team_member(trainer_id, member_id).await?;
            println!("Removed #{member_id}; {} left on the team.", store.team().len());
        }
        TeamCommand::Stats {
            trainer_id,
            member_id,
        } => {
            store.fetch_species(None).await;
            let details = store.team_member_stats(trainer_id, member_id).await?;
            let member = &details.member;
            println!("{}", member_line(store, member));
            if let Some(stats) = details.stats() {
                println!("{}", stats_line(&stats));
            }
            if let Some(species) = store.species_by_id(member.pokemon_id) {
                if !member.verify_stats(&species) {
                    println!("warning: server stats differ from the local formula");
                }
            }
        }
    }
    Ok(())
}

async fn species(store: &Store, args: SpeciesArgs) -> Result<()> {
    store.fetch_species(None).await;
    ensure_ready(store.species_status(), "species")?;

    if args.types {
        for kind in store.species_types() {
            println!("{kind}");
        }
        return Ok(());
    }

    let query = SpeciesQuery {
        type_filter: args.type_filter,
        search: args.search,
        sort: args.sort.parse()?,
    };
    let page = store.query_species(&query);
    println!("{}", page.summary());
    for species in &page.items {
        println!(
            "#{:03} {:<12} {:<16} HP {:>3}  ATK {:>3}  DEF {:>3}  SPD {:>3}  SPC {:>3}",
            species.pokedex_number,
            species.name,
            species.type_label(),
            species.base.hp,
            species.base.attack,
            species.base.defense,
            species.base.speed,
            species.base.special,
        );
    }
    Ok(())
}

async fn preview(store: &Store, species_id: u32, level: i64) -> Result<()> {
    let level = Level::new(level)?;
    store.fetch_species(None).await;
    ensure_ready(store.species_status(), "species")?;

    let species = store
        .species_by_id(species_id)
        .ok_or_else(|| anyhow!("unknown species {species_id}"))?;
    let range = store
        .preview(species_id, level)
        .ok_or_else(|| anyhow!("unknown species {species_id}"))?;

    println!("{} at level {level}", species.name);
    for stat in Stat::ALL {
        println!(
            "  {:<3} {:>3} - {:>3}",
            stat.abbreviation(),
            range.min.get(stat),
            range.max.get(stat)
        );
    }
    Ok(())
}

fn payload(fields: TrainerFields) -> Result<TrainerPayload> {
    let gender = fields
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()?;
    Ok(TrainerPayload {
        name: fields.name,
        age: fields.age,
        gender,
        occupation: fields.occupation,
    })
}

fn ensure_ready(status: CollectionStatus, what: &str) -> Result<()> {
    if status.state == LoadState::Failed {
        match status.error {
            Some(err) => bail!("failed to fetch {what}: {err}"),
            None => bail!("failed to fetch {what}"),
        }
    }
    Ok(())
}

fn last_error(store: &Store, context: &str) -> anyhow::Error {
    match store.error() {
        Some(err) => anyhow!("{context}: {err}"),
        None => anyhow!("{context}"),
    }
}

fn trainer_line(trainer: &Trainer) -> String {
    let mut details = Vec::new();
    if let Some(age) = trainer.age {
        details.push(format!("age {age}"));
    }
    if let Some(gender) = trainer.gender {
        details.push(gender.to_string());
    }
    if let Some(occupation) = trainer.occupation.as_deref() {
        details.push(occupation.to_string());
    }
    if details.is_empty() {
        format!("[{}] {}", trainer.id, trainer.name)
    } else {
        format!("[{}] {} ({})", trainer.id, trainer.name, details.join(", "))
    }
}

fn member_line(store: &Store, member: &TeamMember) -> String {
    let ivs = &member.ivs;
    let mut line = format!(
        "[{}] {} Lv. {}  IV {}/{}/{}/{}",
        member.id,
        store.display_name(member),
        member.level,
        ivs.attack,
        ivs.defense,
        ivs.speed,
        ivs.special
    );
    if let Some(species) = store.species_by_id(member.pokemon_id) {
        line.push_str("  ");
        line.push_str(&stats_line(&member.resolved_stats(&species)));
    }
    line
}

fn stats_line(stats: &CalculatedStats) -> String {
    Stat::ALL
        .iter()
        .map(|stat| format!("{} {}", stat.abbreviation(), stats.get(*stat)))
        .collect::<Vec<_>>()
        .join("  ")
}
