//! Environment facade tests: reset/step lifecycle, rewards, errors, and
//! instrumentation output.

use ccg_gym::{ActionSpaceType, AgentError, Env, EnvError, InfoValue, PlayerConfig, StepResult};

fn mirror_configs() -> Vec<PlayerConfig> {
    vec![
        PlayerConfig::new("hero", &[("Mountain", 20), ("Grey Ogre", 20)]),
        PlayerConfig::new("villain", &[("Mountain", 20), ("Grey Ogre", 20)]),
    ]
}

/// Step with index 0 until the episode terminates, returning the final result.
fn run_to_end(env: &mut Env, limit: usize) -> StepResult {
    for _ in 0..limit {
        let result = env.step(0).unwrap();
        if result.terminated {
            return result;
        }
    }
    panic!("episode did not terminate within {limit} steps");
}

#[test]
fn test_reset_surfaces_a_real_decision() {
    let mut env = Env::new(7);
    let (observation, _) = env.reset(&mirror_configs()).unwrap();

    assert!(observation.validate());
    assert!(!observation.game_over);
    assert_ne!(observation.action_space.space_type, ActionSpaceType::GameOver);
    assert!(observation.action_space.actions.len() >= 2);
}

#[test]
fn test_step_before_reset_is_an_error() {
    let mut env = Env::new(7);
    let err = env.step(0).unwrap_err();
    assert!(matches!(err, EnvError::Agent(AgentError::NotReset)));
}

#[test]
fn test_invalid_index_is_recoverable() {
    let mut env = Env::new(7);
    let (before, _) = env.reset(&mirror_configs()).unwrap();

    let len = before.action_space.actions.len() as i64;
    for bad in [-1, len, len + 5] {
        let err = env.step(bad).unwrap_err();
        assert!(matches!(
            err,
            EnvError::Agent(AgentError::ActionIndexOutOfBounds { .. })
        ));
    }

    // The same space is still pending and answerable.
    let result = env.step(0).unwrap();
    assert!(result.observation.validate());
}

#[test]
fn test_rewards_are_zero_until_terminal() {
    let mut env = Env::new(7);
    env.reset(&mirror_configs()).unwrap();

    let mut last = env.step(0).unwrap();
    let mut steps = 1;
    while !last.terminated {
        assert_eq!(last.reward, 0.0);
        assert!(!last.truncated);
        last = env.step(0).unwrap();
        steps += 1;
        assert!(steps < 5000, "episode did not terminate");
    }

    assert!(last.reward == 1.0 || last.reward == -1.0);
    assert!(last.observation.game_over);
    assert_eq!(
        last.observation.action_space.space_type,
        ActionSpaceType::GameOver
    );
    assert!(matches!(
        last.info.get("winner_name"),
        Some(InfoValue::Str(_))
    ));
}

#[test]
fn test_step_after_terminal_is_an_error() {
    let mut env = Env::new(7);
    env.reset(&mirror_configs()).unwrap();
    run_to_end(&mut env, 5000);

    let err = env.step(0).unwrap_err();
    assert!(matches!(err, EnvError::Agent(AgentError::GameOver)));
}

#[test]
fn test_reset_after_terminal_starts_over() {
    let mut env = Env::new(7);
    env.reset(&mirror_configs()).unwrap();
    run_to_end(&mut env, 5000);

    let (observation, _) = env.reset(&mirror_configs()).unwrap();
    assert!(!observation.game_over);
    assert_eq!(observation.agent.life, 20);
    assert_eq!(observation.opponent.life, 20);
    assert_eq!(observation.agent.zone_counts.iter().sum::<usize>(), 40);
}

#[test]
fn test_skip_trivial_off_surfaces_single_option_spaces() {
    let mut env = Env::new(7).with_skip_trivial(false);
    let (mut observation, _) = env.reset(&mirror_configs()).unwrap();

    let mut trivial = 0;
    for _ in 0..100 {
        if observation.action_space.actions.len() <= 1 {
            trivial += 1;
        }
        let result = env.step(0).unwrap();
        if result.terminated {
            break;
        }
        observation = result.observation;
    }
    // Pass-only priority windows show up when skipping is off.
    assert!(trivial >= 10, "saw only {trivial} trivial spaces");
}

#[test]
fn test_skip_trivial_off_episode_terminates_within_bound() {
    let mut env = Env::new(7).with_skip_trivial(false);
    env.reset(&mirror_configs()).unwrap();

    // Even surfacing every single-option window, the mirror match ends
    // inside 2000 steps under the index-0 policy.
    let last = run_to_end(&mut env, 2000);
    assert!(last.observation.game_over);
}

#[test]
fn test_skip_trivial_on_never_surfaces_single_option_spaces() {
    let mut env = Env::new(7);
    let (mut observation, _) = env.reset(&mirror_configs()).unwrap();

    for _ in 0..100 {
        assert!(observation.action_space.actions.len() >= 2);
        let result = env.step(0).unwrap();
        if result.terminated {
            break;
        }
        observation = result.observation;
    }
}

#[test]
fn test_same_seed_replays_identically() {
    let mut a = Env::new(13);
    let mut b = Env::new(13);
    let (obs_a, _) = a.reset(&mirror_configs()).unwrap();
    let (obs_b, _) = b.reset(&mirror_configs()).unwrap();
    assert_eq!(obs_a, obs_b);

    for _ in 0..50 {
        let ra = a.step(0).unwrap();
        let rb = b.step(0).unwrap();
        assert_eq!(ra.observation, rb.observation);
        assert_eq!(ra.reward, rb.reward);
        if ra.terminated {
            break;
        }
    }
}

#[test]
fn test_reset_replays_the_same_episode() {
    let mut env = Env::new(13);
    let (first, _) = env.reset(&mirror_configs()).unwrap();
    env.step(0).unwrap();
    env.step(0).unwrap();
    let (again, _) = env.reset(&mirror_configs()).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_profiler_info_present_when_enabled() {
    let mut env = Env::new(7).with_profiling(true);
    let (_, info) = env.reset(&mirror_configs()).unwrap();
    match info.get("profiler") {
        Some(InfoValue::Dict(profiler)) => assert!(profiler.contains("env_reset")),
        other => panic!("expected profiler dict, got {other:?}"),
    }

    let result = env.step(0).unwrap();
    match result.info.get("profiler") {
        Some(InfoValue::Dict(profiler)) => assert!(profiler.contains("env_step")),
        other => panic!("expected profiler dict, got {other:?}"),
    }
}

#[test]
fn test_profiler_info_absent_when_disabled() {
    let mut env = Env::new(7);
    let (_, info) = env.reset(&mirror_configs()).unwrap();
    assert!(info.get("profiler").is_none());
    assert!(info.get("behavior").is_none());
}

#[test]
fn test_behavior_info_accumulates_across_resets() {
    let mut env = Env::new(7).with_behavior_tracking(true);
    env.reset(&mirror_configs()).unwrap();
    run_to_end(&mut env, 5000);
    let (_, info) = env.reset(&mirror_configs()).unwrap();

    let behavior = match info.get("behavior") {
        Some(InfoValue::Dict(behavior)) => behavior,
        other => panic!("expected behavior dict, got {other:?}"),
    };
    let hero = match behavior.get("hero") {
        Some(InfoValue::Dict(hero)) => hero,
        other => panic!("expected hero dict, got {other:?}"),
    };
    // One full game already happened before this reset.
    assert_eq!(hero.get("games_played"), Some(&InfoValue::Int(2)));
    assert!(behavior.contains("villain"));
}

#[test]
fn test_info_is_queryable_any_time() {
    let mut env = Env::new(7).with_profiling(true);
    assert!(env.info().is_empty());

    env.reset(&mirror_configs()).unwrap();
    env.step(0).unwrap();
    match env.info().get("profiler") {
        Some(InfoValue::Dict(profiler)) => assert!(profiler.contains("env_step")),
        other => panic!("expected profiler dict, got {other:?}"),
    }
}

#[test]
fn test_reset_with_different_decks_leaves_no_residue() {
    let mut env = Env::new(7);
    env.reset(&mirror_configs()).unwrap();
    env.step(0).unwrap();

    let smaller = vec![
        PlayerConfig::new("hero", &[("Mountain", 15), ("Grey Ogre", 15)]),
        PlayerConfig::new("villain", &[("Forest", 15), ("Llanowar Elves", 15)]),
    ];
    let (observation, _) = env.reset(&smaller).unwrap();
    assert_eq!(observation.agent.zone_counts.iter().sum::<usize>(), 30);
    assert_eq!(observation.opponent.zone_counts.iter().sum::<usize>(), 30);
}

#[test]
fn test_bad_config_is_rejected() {
    let mut env = Env::new(7);
    let err = env.reset(&mirror_configs()[..1]).unwrap_err();
    assert!(matches!(err, EnvError::Agent(AgentError::Config(_))));

    // Unknown card names are caught before any state exists.
    let configs = vec![
        PlayerConfig::new("hero", &[("Black Lotus", 40)]),
        PlayerConfig::new("villain", &[("Mountain", 40)]),
    ];
    let err = env.reset(&configs).unwrap_err();
    assert!(matches!(err, EnvError::Agent(AgentError::Config(_))));
}

#[test]
fn test_failed_reset_keeps_episode_running() {
    let mut env = Env::new(7);
    env.reset(&mirror_configs()).unwrap();
    env.step(0).unwrap();

    let bad = vec![
        PlayerConfig::new("hero", &[("Black Lotus", 40)]),
        PlayerConfig::new("villain", &[("Mountain", 40)]),
    ];
    let err = env.reset(&bad).unwrap_err();
    assert!(matches!(err, EnvError::Agent(AgentError::Config(_))));

    // The rejected reset left the episode in place and answerable.
    let result = env.step(0).unwrap();
    assert!(result.observation.validate());
}

#[test]
fn test_failed_reset_preserves_behavior_counters() {
    let mut env = Env::new(7).with_behavior_tracking(true);
    env.reset(&mirror_configs()).unwrap();
    run_to_end(&mut env, 5000);

    env.reset(&mirror_configs()[..1]).unwrap_err();

    let (_, info) = env.reset(&mirror_configs()).unwrap();
    let behavior = match info.get("behavior") {
        Some(InfoValue::Dict(behavior)) => behavior,
        other => panic!("expected behavior dict, got {other:?}"),
    };
    let hero = match behavior.get("hero") {
        Some(InfoValue::Dict(hero)) => hero,
        other => panic!("expected hero dict, got {other:?}"),
    };
    // The finished game plus this reset; the rejected reset dropped nothing.
    assert_eq!(hero.get("games_played"), Some(&InfoValue::Int(2)));
}
