//! Seeds the fixed theme catalog: themes, their attribute configs, and the
//! personality pool (names, aliases, attribute values). The catalog is not
//! user-editable at runtime; re-running `fresh` reproduces it exactly.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::Query;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Themes {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum ThemeAttributeConfigs {
    Table,
    Id,
    ThemeId,
    Key,
    AnswerType,
    Strength,
    GroupId,
    Enabled,
}

#[derive(Iden)]
enum Personalities {
    Table,
    Id,
    ThemeId,
    Name,
}

#[derive(Iden)]
enum PersonalityAliases {
    Table,
    Id,
    PersonalityId,
    Alias,
}

#[derive(Iden)]
enum PersonalityAttributes {
    Table,
    Id,
    PersonalityId,
    Key,
    AnswerType,
    Value,
}

struct AttrConfig {
    key: &'static str,
    answer_type: &'static str,
    strength: i16,
    group_id: &'static str,
}

struct Person {
    name: &'static str,
    aliases: &'static [&'static str],
    attrs: &'static [(&'static str, &'static str)],
}

struct ThemeSeed {
    id: &'static str,
    name: &'static str,
    configs: &'static [AttrConfig],
    people: &'static [Person],
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

const SPORTS_CONFIGS: &[AttrConfig] = &[
    AttrConfig { key: "gender", answer_type: "YESNO", strength: 1, group_id: "core" },
    AttrConfig { key: "region", answer_type: "YESNO", strength: 2, group_id: "core" },
    AttrConfig { key: "sport", answer_type: "VALUE", strength: 3, group_id: "sport" },
    AttrConfig { key: "active_status", answer_type: "YESNO", strength: 2, group_id: "career" },
    AttrConfig { key: "award_level", answer_type: "YESNO", strength: 3, group_id: "achievement" },
    AttrConfig { key: "world_record", answer_type: "YESNO", strength: 4, group_id: "achievement" },
    AttrConfig { key: "olympic_gold", answer_type: "YESNO", strength: 4, group_id: "achievement" },
    AttrConfig { key: "height_category", answer_type: "VALUE", strength: 2, group_id: "physique" },
    AttrConfig { key: "play_style", answer_type: "VALUE", strength: 5, group_id: "style" },
];

const SPORTS_PEOPLE: &[Person] = &[
    Person { name: "MS Dhoni", aliases: &["Dhoni", "Mahi", "Thala"], attrs: &[("gender", "YES"), ("region", "YES"), ("sport", "Cricket"), ("active_status", "NO"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "NO"), ("height_category", "Average"), ("play_style", "Finisher / Wicket-keeper")] },
    Person { name: "Virat Kohli", aliases: &["Kohli", "King Kohli", "Cheeku"], attrs: &[("gender", "YES"), ("region", "YES"), ("sport", "Cricket"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "NO"), ("height_category", "Average"), ("play_style", "Aggressive Batsman")] },
    Person { name: "Sachin Tendulkar", aliases: &["Sachin", "Master Blaster", "God of Cricket"], attrs: &[("gender", "YES"), ("region", "YES"), ("sport", "Cricket"), ("active_status", "NO"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "NO"), ("height_category", "Short"), ("play_style", "Technical Batsman")] },
    Person { name: "Lionel Messi", aliases: &["Messi", "Leo", "La Pulga"], attrs: &[("gender", "YES"), ("region", "NO"), ("sport", "Football"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "YES"), ("height_category", "Short"), ("play_style", "Playmaker / Dribbler")] },
    Person { name: "Cristiano Ronaldo", aliases: &["Ronaldo", "CR7", "The Goat"], attrs: &[("gender", "YES"), ("region", "NO"), ("sport", "Football"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "NO"), ("height_category", "Tall"), ("play_style", "Power Forward")] },
    Person { name: "Roger Federer", aliases: &["Federer", "RF", "King of Grass"], attrs: &[("gender", "YES"), ("region", "NO"), ("sport", "Tennis"), ("active_status", "NO"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "YES"), ("height_category", "Tall"), ("play_style", "Elegant All-court")] },
    Person { name: "Serena Williams", aliases: &["Serena", "Queen of the Court"], attrs: &[("gender", "NO"), ("region", "NO"), ("sport", "Tennis"), ("active_status", "NO"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "YES"), ("height_category", "Average"), ("play_style", "Power Hitter")] },
    Person { name: "PV Sindhu", aliases: &["Sindhu"], attrs: &[("gender", "NO"), ("region", "YES"), ("sport", "Badminton"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "NO"), ("olympic_gold", "NO"), ("height_category", "Tall"), ("play_style", "Attacking Smashing")] },
    Person { name: "Tiger Woods", aliases: &["Tiger"], attrs: &[("gender", "YES"), ("region", "NO"), ("sport", "Golf"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "NO"), ("height_category", "Tall"), ("play_style", "Precision Putter")] },
    Person { name: "Usain Bolt", aliases: &["Bolt", "Lightning Bolt"], attrs: &[("gender", "YES"), ("region", "NO"), ("sport", "Athletics"), ("active_status", "NO"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "YES"), ("height_category", "Tall"), ("play_style", "Sprinter")] },
    Person { name: "Novak Djokovic", aliases: &["Djokovic", "Nole", "The Joker"], attrs: &[("gender", "YES"), ("region", "NO"), ("sport", "Tennis"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "YES"), ("height_category", "Tall"), ("play_style", "Defensive Mastermind")] },
    Person { name: "Sunil Chhetri", aliases: &["Chhetri", "Captain Fantastic"], attrs: &[("gender", "YES"), ("region", "YES"), ("sport", "Football"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "NO"), ("olympic_gold", "NO"), ("height_category", "Short"), ("play_style", "Clinical Striker")] },
    Person { name: "Rafael Nadal", aliases: &["Nadal", "Rafa", "King of Clay"], attrs: &[("gender", "YES"), ("region", "NO"), ("sport", "Tennis"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "YES"), ("height_category", "Tall"), ("play_style", "High-intensity Topspin")] },
    Person { name: "Neeraj Chopra", aliases: &["Neeraj"], attrs: &[("gender", "YES"), ("region", "YES"), ("sport", "Athletics"), ("active_status", "YES"), ("award_level", "YES"), ("world_record", "NO"), ("olympic_gold", "YES"), ("height_category", "Tall"), ("play_style", "Javelin Thrower")] },
    Person { name: "Abhinav Bindra", aliases: &["Bindra"], attrs: &[("gender", "YES"), ("region", "YES"), ("sport", "Shooting"), ("active_status", "NO"), ("award_level", "YES"), ("world_record", "YES"), ("olympic_gold", "YES"), ("height_category", "Average"), ("play_style", "Precision Marksman")] },
];

const MOVIES_CONFIGS: &[AttrConfig] = &[
    AttrConfig { key: "gender", answer_type: "YESNO", strength: 1, group_id: "core" },
    AttrConfig { key: "region", answer_type: "YESNO", strength: 2, group_id: "core" },
    AttrConfig { key: "profession", answer_type: "VALUE", strength: 3, group_id: "career" },
    AttrConfig { key: "oscar_winner", answer_type: "YESNO", strength: 3, group_id: "achievement" },
    AttrConfig { key: "hollywood", answer_type: "YESNO", strength: 2, group_id: "region" },
    AttrConfig { key: "bollywood", answer_type: "YESNO", strength: 2, group_id: "region" },
    AttrConfig { key: "superhero_role", answer_type: "YESNO", strength: 4, group_id: "roles" },
    AttrConfig { key: "action_star", answer_type: "YESNO", strength: 4, group_id: "roles" },
];

const MOVIES_PEOPLE: &[Person] = &[
    Person { name: "Shah Rukh Khan", aliases: &["SRK", "King Khan", "Badshah"], attrs: &[("gender", "YES"), ("region", "YES"), ("profession", "Actor"), ("oscar_winner", "NO"), ("hollywood", "NO"), ("bollywood", "YES"), ("superhero_role", "YES"), ("action_star", "YES")] },
    Person { name: "Tom Cruise", aliases: &["Ethan Hunt"], attrs: &[("gender", "YES"), ("region", "NO"), ("profession", "Actor"), ("oscar_winner", "NO"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "NO"), ("action_star", "YES")] },
    Person { name: "Amitabh Bachchan", aliases: &["Big B", "Shenshah"], attrs: &[("gender", "YES"), ("region", "YES"), ("profession", "Actor"), ("oscar_winner", "NO"), ("hollywood", "NO"), ("bollywood", "YES"), ("superhero_role", "NO"), ("action_star", "YES")] },
    Person { name: "Leonardo DiCaprio", aliases: &["Leo"], attrs: &[("gender", "YES"), ("region", "NO"), ("profession", "Actor"), ("oscar_winner", "YES"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "NO"), ("action_star", "NO")] },
    Person { name: "Robert Downey Jr.", aliases: &["RDJ", "Iron Man", "Tony Stark"], attrs: &[("gender", "YES"), ("region", "NO"), ("profession", "Actor"), ("oscar_winner", "YES"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "YES"), ("action_star", "YES")] },
    Person { name: "Scarlett Johansson", aliases: &["Black Widow"], attrs: &[("gender", "NO"), ("region", "NO"), ("profession", "Actor"), ("oscar_winner", "NO"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "YES"), ("action_star", "YES")] },
    Person { name: "Deepika Padukone", aliases: &["Deepu"], attrs: &[("gender", "NO"), ("region", "YES"), ("profession", "Actor"), ("oscar_winner", "NO"), ("hollywood", "YES"), ("bollywood", "YES"), ("superhero_role", "NO"), ("action_star", "YES")] },
    Person { name: "Meryl Streep", aliases: &[], attrs: &[("gender", "NO"), ("region", "NO"), ("profession", "Actor"), ("oscar_winner", "YES"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "NO"), ("action_star", "NO")] },
    Person { name: "Christopher Nolan", aliases: &[], attrs: &[("gender", "YES"), ("region", "NO"), ("profession", "Director"), ("oscar_winner", "YES"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "NO"), ("action_star", "NO")] },
    Person { name: "Steven Spielberg", aliases: &[], attrs: &[("gender", "YES"), ("region", "NO"), ("profession", "Director"), ("oscar_winner", "YES"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "NO"), ("action_star", "NO")] },
    Person { name: "Priyanka Chopra", aliases: &["PC", "Piggy Chops"], attrs: &[("gender", "NO"), ("region", "YES"), ("profession", "Actor"), ("oscar_winner", "NO"), ("hollywood", "YES"), ("bollywood", "YES"), ("superhero_role", "NO"), ("action_star", "NO")] },
    Person { name: "Rajinikanth", aliases: &["Thalaiva", "Superstar"], attrs: &[("gender", "YES"), ("region", "YES"), ("profession", "Actor"), ("oscar_winner", "NO"), ("hollywood", "NO"), ("bollywood", "YES"), ("superhero_role", "NO"), ("action_star", "YES")] },
    Person { name: "Jackie Chan", aliases: &[], attrs: &[("gender", "YES"), ("region", "YES"), ("profession", "Actor"), ("oscar_winner", "YES"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "NO"), ("action_star", "YES")] },
    Person { name: "Brad Pitt", aliases: &[], attrs: &[("gender", "YES"), ("region", "NO"), ("profession", "Actor"), ("oscar_winner", "YES"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "NO"), ("action_star", "NO")] },
    Person { name: "Angelina Jolie", aliases: &[], attrs: &[("gender", "NO"), ("region", "NO"), ("profession", "Actor"), ("oscar_winner", "YES"), ("hollywood", "YES"), ("bollywood", "NO"), ("superhero_role", "NO"), ("action_star", "YES")] },
];

const HISTORY_CONFIGS: &[AttrConfig] = &[
    AttrConfig { key: "gender", answer_type: "YESNO", strength: 1, group_id: "core" },
    AttrConfig { key: "region", answer_type: "YESNO", strength: 2, group_id: "core" },
    AttrConfig { key: "vocation", answer_type: "VALUE", strength: 3, group_id: "career" },
    AttrConfig { key: "century", answer_type: "VALUE", strength: 2, group_id: "time" },
    AttrConfig { key: "political_leader", answer_type: "YESNO", strength: 3, group_id: "career" },
    AttrConfig { key: "scientist", answer_type: "YESNO", strength: 4, group_id: "career" },
    AttrConfig { key: "nobel_prize", answer_type: "YESNO", strength: 4, group_id: "achievement" },
    AttrConfig { key: "royalty", answer_type: "YESNO", strength: 5, group_id: "status" },
];

const HISTORY_PEOPLE: &[Person] = &[
    Person { name: "Mahatma Gandhi", aliases: &["Bapu", "Father of the Nation"], attrs: &[("gender", "YES"), ("region", "YES"), ("vocation", "Freedom Fighter"), ("century", "20th"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "NO"), ("royalty", "NO")] },
    Person { name: "Albert Einstein", aliases: &[], attrs: &[("gender", "YES"), ("region", "NO"), ("vocation", "Physicist"), ("century", "20th"), ("political_leader", "NO"), ("scientist", "YES"), ("nobel_prize", "YES"), ("royalty", "NO")] },
    Person { name: "Nelson Mandela", aliases: &["Madiba"], attrs: &[("gender", "YES"), ("region", "NO"), ("vocation", "Revolutionary"), ("century", "20th"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "YES"), ("royalty", "NO")] },
    Person { name: "Abraham Lincoln", aliases: &["Abe"], attrs: &[("gender", "YES"), ("region", "NO"), ("vocation", "President"), ("century", "19th"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "NO"), ("royalty", "NO")] },
    Person { name: "Marie Curie", aliases: &[], attrs: &[("gender", "NO"), ("region", "NO"), ("vocation", "Chemist"), ("century", "20th"), ("political_leader", "NO"), ("scientist", "YES"), ("nobel_prize", "YES"), ("royalty", "NO")] },
    Person { name: "Leonardo da Vinci", aliases: &[], attrs: &[("gender", "YES"), ("region", "NO"), ("vocation", "Polymath"), ("century", "15th"), ("political_leader", "NO"), ("scientist", "YES"), ("nobel_prize", "NO"), ("royalty", "NO")] },
    Person { name: "Ashoka the Great", aliases: &["Samrat Ashoka"], attrs: &[("gender", "YES"), ("region", "YES"), ("vocation", "Emperor"), ("century", "3rd BC"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "NO"), ("royalty", "YES")] },
    Person { name: "Napoleon Bonaparte", aliases: &["Napoleon"], attrs: &[("gender", "YES"), ("region", "NO"), ("vocation", "Emperor"), ("century", "19th"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "NO"), ("royalty", "YES")] },
    Person { name: "Martin Luther King Jr.", aliases: &["MLK"], attrs: &[("gender", "YES"), ("region", "NO"), ("vocation", "Activist"), ("century", "20th"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "YES"), ("royalty", "NO")] },
    Person { name: "Mother Teresa", aliases: &["Saint Teresa"], attrs: &[("gender", "NO"), ("region", "NO"), ("vocation", "Nun"), ("century", "20th"), ("political_leader", "NO"), ("scientist", "NO"), ("nobel_prize", "YES"), ("royalty", "NO")] },
    Person { name: "Isaac Newton", aliases: &[], attrs: &[("gender", "YES"), ("region", "NO"), ("vocation", "Mathematician"), ("century", "17th"), ("political_leader", "NO"), ("scientist", "YES"), ("nobel_prize", "NO"), ("royalty", "NO")] },
    Person { name: "APJ Abdul Kalam", aliases: &["Missile Man"], attrs: &[("gender", "YES"), ("region", "YES"), ("vocation", "Scientist"), ("century", "21st"), ("political_leader", "YES"), ("scientist", "YES"), ("nobel_prize", "NO"), ("royalty", "NO")] },
    Person { name: "Julius Caesar", aliases: &[], attrs: &[("gender", "YES"), ("region", "NO"), ("vocation", "General"), ("century", "1st BC"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "NO"), ("royalty", "YES")] },
    Person { name: "Queen Elizabeth II", aliases: &[], attrs: &[("gender", "NO"), ("region", "NO"), ("vocation", "Queen"), ("century", "21st"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "NO"), ("royalty", "YES")] },
    Person { name: "Subhas Chandra Bose", aliases: &["Netaji"], attrs: &[("gender", "YES"), ("region", "YES"), ("vocation", "Revolutionary"), ("century", "20th"), ("political_leader", "YES"), ("scientist", "NO"), ("nobel_prize", "NO"), ("royalty", "NO")] },
];

const THEMES: &[ThemeSeed] = &[
    ThemeSeed { id: "sports", name: "Sports", configs: SPORTS_CONFIGS, people: SPORTS_PEOPLE },
    ThemeSeed { id: "movies", name: "Movies", configs: MOVIES_CONFIGS, people: MOVIES_PEOPLE },
    ThemeSeed { id: "history", name: "History", configs: HISTORY_CONFIGS, people: HISTORY_PEOPLE },
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for theme in THEMES {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(Themes::Table)
                        .columns([Themes::Id, Themes::Name])
                        .values_panic([theme.id.into(), theme.name.into()])
                        .to_owned(),
                )
                .await?;

            for cfg in theme.configs {
                manager
                    .exec_stmt(
                        Query::insert()
                            .into_table(ThemeAttributeConfigs::Table)
                            .columns([
                                ThemeAttributeConfigs::Id,
                                ThemeAttributeConfigs::ThemeId,
                                ThemeAttributeConfigs::Key,
                                ThemeAttributeConfigs::AnswerType,
                                ThemeAttributeConfigs::Strength,
                                ThemeAttributeConfigs::GroupId,
                                ThemeAttributeConfigs::Enabled,
                            ])
                            .values_panic([
                                format!("{}-cfg-{}", theme.id, cfg.key).into(),
                                theme.id.into(),
                                cfg.key.into(),
                                cfg.answer_type.into(),
                                cfg.strength.into(),
                                cfg.group_id.into(),
                                true.into(),
                            ])
                            .to_owned(),
                    )
                    .await?;
            }

            for person in theme.people {
                let person_id = format!("{}-{}", theme.id, slug(person.name));
                manager
                    .exec_stmt(
                        Query::insert()
                            .into_table(Personalities::Table)
                            .columns([
                                Personalities::Id,
                                Personalities::ThemeId,
                                Personalities::Name,
                            ])
                            .values_panic([
                                person_id.clone().into(),
                                theme.id.into(),
                                person.name.into(),
                            ])
                            .to_owned(),
                    )
                    .await?;

                for (i, alias) in person.aliases.iter().enumerate() {
                    manager
                        .exec_stmt(
                            Query::insert()
                                .into_table(PersonalityAliases::Table)
                                .columns([
                                    PersonalityAliases::Id,
                                    PersonalityAliases::PersonalityId,
                                    PersonalityAliases::Alias,
                                ])
                                .values_panic([
                                    format!("{person_id}-alias-{i}").into(),
                                    person_id.clone().into(),
                                    (*alias).into(),
                                ])
                                .to_owned(),
                        )
                        .await?;
                }

                for (key, value) in person.attrs {
                    // answer type comes from the theme's config for that key
                    let answer_type = theme
                        .configs
                        .iter()
                        .find(|c| c.key == *key)
                        .map(|c| c.answer_type)
                        .unwrap_or("YESNO");
                    manager
                        .exec_stmt(
                            Query::insert()
                                .into_table(PersonalityAttributes::Table)
                                .columns([
                                    PersonalityAttributes::Id,
                                    PersonalityAttributes::PersonalityId,
                                    PersonalityAttributes::Key,
                                    PersonalityAttributes::AnswerType,
                                    PersonalityAttributes::Value,
                                ])
                                .values_panic([
                                    format!("{person_id}-attr-{key}").into(),
                                    person_id.clone().into(),
                                    (*key).into(),
                                    answer_type.into(),
                                    (*value).into(),
                                ])
                                .to_owned(),
                        )
                        .await?;
                }
            }
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(PersonalityAttributes::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(PersonalityAliases::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Personalities::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(ThemeAttributeConfigs::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Themes::Table).to_owned())
            .await?;
        Ok(())
    }
}
