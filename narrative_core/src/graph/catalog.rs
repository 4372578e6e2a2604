//! The standard night: every scene, its text, costs and timings.

use game_rules::{EndingKind, GameConfig, Item, StatDelta};

use super::{Beat, ChoiceSpec, Condition, Effect, Location, Narration, Scene, SceneId, Transition};
use crate::presentation::Sprite;

/// Shown when the tank runs dry.
pub const STRANDED_TEXT: &str =
    "The car sputters and dies. You're out of fuel, stranded in the dark.";

/// Car condition after the spark plug is replaced.
pub const REPAIRED_CAR_CONDITION: u8 = 30;

/// Car condition after she kills the engine.
const STALLED_CAR_CONDITION: u8 = 10;

const CHASE_LOOP_MS: u64 = 3_000;
const CAPTURE_DELAY_MS: u64 = 2_000;
const SEARCH_DELAY_MS: u64 = 3_000;
const HIDING_SUSPENSE_MS: u64 = 3_000;

/// Build every scene of the night.
pub fn standard_scenes(config: &GameConfig) -> Vec<Scene> {
    let mut scenes = vec![
        sighting(),
        drive_past(),
        stop_car(),
        chase(),
        on_foot(),
        hiding(config.hide_capture_chance),
        scare_reveal(),
        search_barrack(),
        search_post_office(),
        back_to_car(),
        fix_car(),
    ];
    scenes.extend(
        Location::ALL
            .into_iter()
            .map(|location| exploring(location, config.explore_capture_chance)),
    );
    scenes
}

fn goto(id: SceneId) -> Transition {
    Transition::Goto(id)
}

fn sighting() -> Scene {
    Scene::new(SceneId::Sighting).with_beat(
        Beat::now()
            .with_image(Sprite::Sighting)
            .with_text("You see a woman standing in the road ahead. She seems... familiar. What do you do?")
            .with_choices([
                ChoiceSpec::leads_to("Speed past her.", goto(SceneId::DrivePast)),
                ChoiceSpec::leads_to("Stop the car.", goto(SceneId::StopCar)),
            ]),
    )
}

fn drive_past() -> Scene {
    Scene::new(SceneId::DrivePast)
        .with_beat(
            Beat::now()
                .with_image(Sprite::Driving)
                .with_text("You floor it, speeding past the spot where she stood. A glance in the rearview mirror reveals a terrifying sight...")
                .with_cost(StatDelta::new(10, 5, 0))
                .clearing_choices(),
        )
        .with_beat(
            Beat::at(3_000)
                .with_glitch_image(Sprite::ChaseMirror)
                .with_text("She's right behind you! The car feels colder. A soft <i>*TAP... TAP...*</i> starts on the roof.")
                .then(Transition::after(4_000, goto(SceneId::Chase))),
        )
}

fn stop_car() -> Scene {
    Scene::new(SceneId::StopCar).with_beat(
        Beat::now()
            .with_image(Sprite::Sighting)
            .with_text("You stop. She approaches and whispers a name that sounds like an echo... \"Rohan...\" Then, the engine dies. You're stranded.")
            .with_effect(Effect::SetCarCondition(STALLED_CAR_CONDITION))
            .with_cost(StatDelta::sanity(10))
            .clearing_choices()
            .then(Transition::after(4_000, goto(SceneId::OnFoot))),
    )
}

fn chase() -> Scene {
    let swerve = Beat::now()
        .with_text("You yank the wheel! The car screeches, but she's still there.")
        .with_cost(StatDelta::new(5, 2, 20))
        .then(Transition::after(CHASE_LOOP_MS, goto(SceneId::Chase)));
    let focus = Beat::now()
        .with_text("You stare at the road, but her image is burned into your mind. The psychological toll is immense.")
        .with_cost(StatDelta::new(15, 2, 0))
        .then(Transition::after(CHASE_LOOP_MS, goto(SceneId::Chase)));

    Scene::new(SceneId::Chase).with_beat(
        Beat::now()
            .with_glitch_image(Sprite::ChaseMirror)
            .with_text("She's keeping pace, her horrifying face reflected in your mirror! The whispers are clawing at your mind.")
            .with_cost(StatDelta::new(10, 5, 0))
            .with_choices([
                ChoiceSpec::new("Swerve to shake her!", swerve),
                ChoiceSpec::new("Focus and drive faster!", focus),
            ]),
    )
}

fn on_foot() -> Scene {
    let remembers_but_lacks_locket =
        Condition::All(vec![Condition::Has(Item::Clue), Condition::Lacks(Item::Locket)]);

    Scene::new(SceneId::OnFoot).with_beat(
        Beat::now()
            .with_image(Sprite::Driving)
            .with_narration(Narration::conditional(
                remembers_but_lacks_locket,
                "You remember her name... Anjali. You know you need to find her locket. Where could it be?",
                "You're on your own. The night is alive with sounds. What's your next move?",
            ))
            .with_cost(StatDelta::sanity(5))
            .with_choices([
                ChoiceSpec::leads_to(
                    "Search abandoned barrack",
                    goto(SceneId::Exploring(Location::Barrack)),
                )
                .enabled_when(Condition::Lacks(Item::Locket)),
                ChoiceSpec::leads_to("Hide in the car", goto(SceneId::Hiding)),
                ChoiceSpec::leads_to(
                    "Search old post office",
                    goto(SceneId::Exploring(Location::PostOffice)),
                )
                .enabled_when(Condition::Lacks(Item::Clue)),
            ]),
    )
}

fn hiding(capture_chance: f64) -> Scene {
    Scene::new(SceneId::Hiding).with_beat(
        Beat::now()
            .with_text("You lock the doors, holding your breath and listening to the suffocating silence...")
            .clearing_choices()
            .then(Transition::after(
                HIDING_SUSPENSE_MS,
                Transition::chance(
                    capture_chance,
                    Transition::End(EndingKind::Captured),
                    goto(SceneId::ScareReveal),
                ),
            )),
    )
}

fn scare_reveal() -> Scene {
    Scene::new(SceneId::ScareReveal).with_beat(
        Beat::now()
            .with_image(Sprite::CarHiding)
            .with_text("You exhale, thinking you're safe... but then a handprint appears on the glass. You are not alone in here.")
            .with_cost(StatDelta::sanity(20))
            .with_choices([ChoiceSpec::leads_to("I have to get out.", goto(SceneId::OnFoot))]),
    )
}

/// The shared approach for every location: roll for capture on arrival,
/// otherwise move on to the location's search.
pub fn exploring(location: Location, capture_chance: f64) -> Scene {
    Scene::new(SceneId::Exploring(location)).with_beat(
        Beat::now()
            .with_image(location.sprite())
            .with_text(location.approach_text())
            .clearing_choices()
            .then(Transition::chance(
                capture_chance,
                Transition::after(CAPTURE_DELAY_MS, Transition::End(EndingKind::Captured)),
                Transition::after(SEARCH_DELAY_MS, goto(location.search_scene())),
            )),
    )
}

fn search_barrack() -> Scene {
    Scene::new(SceneId::SearchBarrack).with_beat(
        Beat::now()
            .with_text("Inside, you find a working spark plug and a tarnished locket! It feels warm to the touch, familiar... A cold gust of wind slams the door shut.")
            .with_effect(Effect::Grant(Item::SparkPlug))
            .with_effect(Effect::Grant(Item::Locket))
            .with_cost(StatDelta::sanity(15))
            .with_choices([ChoiceSpec::leads_to("Return to the car", goto(SceneId::BackToCar))]),
    )
}

fn search_post_office() -> Scene {
    Scene::new(SceneId::SearchPostOffice)
        .with_beat(
            Beat::now()
                .clearing_choices()
                .with_text("You push open the door to the decaying post office. The air is thick with the smell of wet paper and regret."),
        )
        .with_beat(
            Beat::at(3_000)
                .with_text("Under a pile of rotten mailbags, you find a small, water-damaged leather satchel. You open it...")
                .with_cost(StatDelta::sanity(5)),
        )
        .with_beat(
            Beat::at(7_000)
                .with_text("Inside is a yellowed newspaper clipping. The text is faded: <i>'JHARIA CHRONICLE - July 19th, 1985. A tragic hit-and-run... claimed the life of Anjali Sharma, 22. A newlywed, she was reportedly on her way to meet her husband, army officer Rohan Sharma... A treasured locket was lost at the scene...'</i>")
                .with_cost(StatDelta::sanity(10)),
        )
        .with_beat(
            Beat::at(14_000)
                .with_glitch_image(Sprite::Driving)
                .with_text("Deeper in the satchel, there's a faded photograph. A smiling young woman in a white saree... next to a man in uniform. You... he looks so familiar... You turn it over. In neat cursive, it reads: <br><i>'My Anjali. My love, my life. Your Rohan.'</i><br> The name hits you like a physical blow. Your name.")
                .with_cost(StatDelta::sanity(20)),
        )
        .with_beat(
            Beat::at(21_000)
                .with_effect(Effect::Grant(Item::Clue))
                .with_image(Sprite::Driving)
                .with_text("You unfold one last brittle, water-stained letter. It's her handwriting. <i>'My dearest Rohan, The storm is terrible tonight, but nothing will keep me from meeting you. I'm wearing the locket you gave me, so it feels like you're already here...'</i> Her words trail off, stained into oblivion. You remember everything.")
                .with_choices([ChoiceSpec::leads_to(
                    "I have to find her locket.",
                    goto(SceneId::BackToCar),
                )]),
        )
}

fn back_to_car() -> Scene {
    let can_repair = Condition::All(vec![
        Condition::Has(Item::SparkPlug),
        Condition::CarBelow(REPAIRED_CAR_CONDITION),
    ]);

    Scene::new(SceneId::BackToCar).with_beat(
        Beat::now()
            .with_image(Sprite::Driving)
            .with_narration(Narration::conditional(
                Condition::All(vec![Condition::Has(Item::Clue), Condition::Lacks(Item::Locket)]),
                "You remember her... Anjali. But the memory of the locket is hazy. The newspaper said it was lost. You must find it.",
                "You make it back to the car. Your goal is clear now.",
            ))
            .with_choices([
                ChoiceSpec::leads_to("Fix the car. For her.", goto(SceneId::FixCar))
                    .visible_when(can_repair.clone()),
                ChoiceSpec::leads_to("I need to search the area.", goto(SceneId::OnFoot))
                    .visible_when(can_repair.negate()),
            ]),
    )
}

fn fix_car() -> Scene {
    let knows_everything =
        Condition::All(vec![Condition::Has(Item::Locket), Condition::Has(Item::Clue)]);

    Scene::new(SceneId::FixCar).with_beat(
        Beat::now()
            .with_effect(Effect::SetCarCondition(REPAIRED_CAR_CONDITION))
            .with_text("With steady hands, you replace the spark plug. The engine turns over! It's time to end this loop.")
            .with_cost(StatDelta::NONE)
            .with_choices([
                ChoiceSpec::leads_to(
                    "Drive to where you first saw her",
                    Transition::End(EndingKind::TrueEnding),
                )
                .visible_when(knows_everything.clone()),
                ChoiceSpec::leads_to("Drive!", goto(SceneId::Chase))
                    .visible_when(knows_everything.negate()),
            ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_rules::{GameState, Resources};

    fn scene(id: SceneId) -> Scene {
        standard_scenes(&GameConfig::default())
            .into_iter()
            .find(|scene| scene.id == id)
            .unwrap()
    }

    fn labels(scene: &Scene, state: &GameState) -> Vec<(String, bool)> {
        scene.beats[0]
            .choices
            .iter()
            .flatten()
            .filter_map(|choice| choice.render(state))
            .map(|view| (view.label, view.enabled))
            .collect()
    }

    #[test]
    fn test_every_scene_is_unique() {
        let scenes = standard_scenes(&GameConfig::default());
        let mut ids: Vec<_> = scenes.iter().map(|s| s.id.as_string()).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 13);
    }

    #[test]
    fn test_on_foot_disables_finished_searches() {
        let on_foot = scene(SceneId::OnFoot);

        let fresh = labels(&on_foot, &GameState::default());
        assert!(fresh.iter().all(|(_, enabled)| *enabled));

        let done = GameState::default()
            .with_item(Item::Locket)
            .with_item(Item::Clue);
        let done = labels(&on_foot, &done);
        assert_eq!(
            done,
            vec![
                ("Search abandoned barrack".to_string(), false),
                ("Hide in the car".to_string(), true),
                ("Search old post office".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_back_to_car_offers_exactly_one_route() {
        let back = scene(SceneId::BackToCar);

        let broken = GameState::default()
            .with_resources(Resources::new(50, 50, 10))
            .with_item(Item::SparkPlug);
        assert_eq!(labels(&back, &broken)[0].0, "Fix the car. For her.");
        assert_eq!(labels(&back, &broken).len(), 1);

        let healthy = GameState::default().with_item(Item::SparkPlug);
        assert_eq!(labels(&back, &healthy)[0].0, "I need to search the area.");

        let no_plug = GameState::default().with_resources(Resources::new(50, 50, 10));
        assert_eq!(labels(&back, &no_plug)[0].0, "I need to search the area.");
    }

    #[test]
    fn test_exploration_uses_configured_odds() {
        let config = GameConfig {
            explore_capture_chance: 0.4,
            ..GameConfig::default()
        };
        let scenes = standard_scenes(&config);
        let barrack = scenes
            .iter()
            .find(|s| s.id == SceneId::Exploring(Location::Barrack))
            .unwrap();

        match &barrack.beats[0].then {
            Some(Transition::Chance { chance, .. }) => assert!((chance - 0.4).abs() < 1e-9),
            other => panic!("unexpected transition: {:?}", other),
        }
    }

    #[test]
    fn test_post_office_reveal_offsets() {
        let post_office = scene(SceneId::SearchPostOffice);
        let offsets: Vec<_> = post_office.beats.iter().map(|b| b.at_ms).collect();
        assert_eq!(offsets, vec![0, 3_000, 7_000, 14_000, 21_000]);
    }
}
