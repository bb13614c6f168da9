//! Range checks for controller tuning.

use super::ControllerConfig;

/// A single out-of-range tuning value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: f32,
    pub expected: &'static str,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "field '{}' = {} (expected {})",
            self.field, self.value, self.expected
        )
    }
}

impl std::error::Error for ConfigError {}

/// Helper macro for checking a numeric constraint
macro_rules! check {
    ($errors:expr, $field:expr, $value:expr, $ok:expr, $expected:expr) => {
        let value = $value as f32;
        if !($ok)(value) {
            $errors.push(ConfigError {
                field: $field,
                value,
                expected: $expected,
            });
        }
    };
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn unit_interval(v: f32) -> bool {
    v.is_finite() && (0.0..=1.0).contains(&v)
}

fn at_least_one(v: f32) -> bool {
    v.is_finite() && v >= 1.0
}

/// Validate every tuning value.
/// Returns a list of errors, empty if the config is usable.
pub fn validate_config(config: &ControllerConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let m = &config.motion;
    check!(errors, "motion.walk_speed", m.walk_speed, non_negative, ">= 0");
    check!(errors, "motion.run_speed", m.run_speed, non_negative, ">= 0");
    check!(errors, "motion.air_walk_speed", m.air_walk_speed, non_negative, ">= 0");
    check!(errors, "motion.air_run_speed", m.air_run_speed, non_negative, ">= 0");
    check!(errors, "motion.ground_acceleration", m.ground_acceleration, positive, "> 0");
    check!(errors, "motion.run_acceleration", m.run_acceleration, positive, "> 0");
    check!(errors, "motion.air_acceleration", m.air_acceleration, positive, "> 0");
    check!(
        errors,
        "motion.wall_slide_acceleration",
        m.wall_slide_acceleration,
        non_negative,
        ">= 0"
    );
    check!(errors, "motion.ground_deceleration", m.ground_deceleration, positive, "> 0");
    check!(errors, "motion.air_deceleration", m.air_deceleration, non_negative, ">= 0");
    check!(errors, "motion.input_dead_zone", m.input_dead_zone, unit_interval, "in [0, 1]");
    check!(
        errors,
        "motion.wall_stick_dead_zone",
        m.wall_stick_dead_zone,
        unit_interval,
        "in [0, 1]"
    );
    check!(errors, "motion.step_height", m.step_height, non_negative, ">= 0");
    check!(errors, "motion.step_width", m.step_width, non_negative, ">= 0");

    let g = &config.gravity;
    check!(errors, "gravity.gravity", g.gravity, positive, "> 0");
    check!(errors, "gravity.fall_multiplier", g.fall_multiplier, at_least_one, ">= 1");
    check!(
        errors,
        "gravity.apex_threshold",
        g.apex_threshold,
        |v: f32| v.is_finite() && v > 0.0 && v < 1.0,
        "in (0, 1)"
    );
    check!(errors, "gravity.apex_hang_time", g.apex_hang_time, non_negative, ">= 0");
    check!(errors, "gravity.apex_exit_speed", g.apex_exit_speed, non_negative, ">= 0");
    check!(errors, "gravity.max_fall_speed", g.max_fall_speed, positive, "> 0");
    check!(errors, "gravity.max_rise_speed", g.max_rise_speed, positive, "> 0");
    check!(errors, "gravity.grounded_bias", g.grounded_bias, non_negative, ">= 0");
    check!(errors, "gravity.landing_bop", g.landing_bop, non_negative, ">= 0");
    check!(errors, "gravity.fall_damage", g.fall_damage, non_negative, ">= 0");
    check!(errors, "gravity.wall_slide_speed", g.wall_slide_speed, positive, "> 0");
    check!(
        errors,
        "gravity.wall_slide_smoothing",
        g.wall_slide_smoothing,
        positive,
        "> 0"
    );
    check!(
        errors,
        "gravity.fast_drop_multiplier",
        g.fast_drop_multiplier,
        at_least_one,
        ">= 1"
    );
    check!(
        errors,
        "gravity.fast_drop_threshold",
        g.fast_drop_threshold,
        unit_interval,
        "in [0, 1]"
    );
    if g.wall_slide_speed > g.max_fall_speed {
        errors.push(ConfigError {
            field: "gravity.wall_slide_speed",
            value: g.wall_slide_speed,
            expected: "<= gravity.max_fall_speed",
        });
    }

    if g.grounded_bias > g.max_fall_speed {
        errors.push(ConfigError {
            field: "gravity.grounded_bias",
            value: g.grounded_bias,
            expected: "<= gravity.max_fall_speed",
        });
    }

    let j = &config.jump;
    check!(errors, "jump.jump_velocity", j.jump_velocity, positive, "> 0");
    check!(
        errors,
        "jump.jump_cut_multiplier",
        j.jump_cut_multiplier,
        unit_interval,
        "in [0, 1]"
    );
    check!(errors, "jump.max_jumps", j.max_jumps, at_least_one, ">= 1");
    check!(errors, "jump.jump_buffer_time", j.jump_buffer_time, non_negative, ">= 0");
    check!(errors, "jump.coyote_time", j.coyote_time, non_negative, ">= 0");

    let w = &config.wall;
    check!(errors, "wall.jump_horizontal", w.jump_horizontal, non_negative, ">= 0");
    check!(errors, "wall.jump_vertical", w.jump_vertical, non_negative, ">= 0");
    check!(errors, "wall.jump_lock_time", w.jump_lock_time, non_negative, ">= 0");

    let d = &config.dash;
    check!(errors, "dash.dash_force", d.dash_force, non_negative, ">= 0");
    check!(errors, "dash.dash_time", d.dash_time, non_negative, ">= 0");
    check!(
        errors,
        "dash.invincibility_time",
        d.invincibility_time,
        non_negative,
        ">= 0"
    );
    check!(errors, "dash.dash_buffer_time", d.dash_buffer_time, non_negative, ">= 0");
    if d.enabled && d.max_dashes == 0 {
        errors.push(ConfigError {
            field: "dash.max_dashes",
            value: 0.0,
            expected: ">= 1 when dash.enabled",
        });
    }

    let h = &config.health;
    check!(errors, "health.max_health", h.max_health, at_least_one, ">= 1");
    check!(
        errors,
        "health.damage_invincibility_time",
        h.damage_invincibility_time,
        non_negative,
        ">= 0"
    );
    check!(
        errors,
        "health.max_knockback_speed",
        h.max_knockback_speed,
        non_negative,
        ">= 0"
    );
    check!(errors, "health.knockback_lift", h.knockback_lift, non_negative, ">= 0");
    check!(
        errors,
        "health.respawn_invincibility_time",
        h.respawn_invincibility_time,
        positive,
        "> 0"
    );
    check!(errors, "health.respawn_stun_time", h.respawn_stun_time, positive, "> 0");
    // A respawn must outlast an ordinary hit
    if h.respawn_invincibility_time < h.damage_invincibility_time {
        errors.push(ConfigError {
            field: "health.respawn_invincibility_time",
            value: h.respawn_invincibility_time,
            expected: ">= health.damage_invincibility_time",
        });
    }

    let p = &config.probe;
    check!(
        errors,
        "probe.ground_cast_distance",
        p.ground_cast_distance,
        positive,
        "> 0"
    );
    check!(errors, "probe.wall_cast_distance", p.wall_cast_distance, positive, "> 0");
    check!(errors, "probe.head_cast_distance", p.head_cast_distance, positive, "> 0");
    check!(errors, "probe.feet_height", p.feet_height, positive, "> 0");
    check!(
        errors,
        "probe.feet_width_fraction",
        p.feet_width_fraction,
        |v: f32| v.is_finite() && v > 0.0 && v <= 1.0,
        "in (0, 1]"
    );
    check!(
        errors,
        "probe.head_width_fraction",
        p.head_width_fraction,
        |v: f32| v.is_finite() && v > 0.0 && v <= 1.0,
        "in (0, 1]"
    );
    check!(errors, "probe.ankle_height", p.ankle_height, non_negative, ">= 0");

    errors
}
