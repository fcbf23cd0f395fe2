// src/wizard/transition.rs
use log::{debug, warn};

use crate::errors::LogoError;
use crate::models::{DownloadAction, Industry, Layout, LogoStyle};
use crate::services::color;

use super::effect::{ConceptRequest, Effect};
use super::event::{CustomizationKey, Event};
use super::state::{Step, WizardState};

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub state: WizardState,
    pub effect: Option<Effect>,
    /// Set when a guard refused the event. `state` is then the input state.
    pub rejection: Option<LogoError>,
}

/// Apply `event` to `state`.
///
/// Guard failures leave the state untouched and come back as a rejection.
/// Selection and generation failures are recorded in `state.error`
/// instead, so the renderer can show them.
pub fn transition(state: &WizardState, event: Event) -> Outcome {
    let name = event.name();
    match apply(state, event) {
        Ok((next, effect)) => Outcome {
            state: next,
            effect,
            rejection: None,
        },
        Err(err @ LogoError::Validation(_)) => {
            debug!("Rejected {} at step {}: {}", name, state.step, err);
            Outcome {
                state: state.clone(),
                effect: None,
                rejection: Some(err),
            }
        }
        Err(err) => {
            warn!("{} failed at step {}: {}", name, state.step, err);
            let mut next = state.clone();
            next.error = Some(err.to_string());
            Outcome {
                state: next,
                effect: None,
                rejection: None,
            }
        }
    }
}

fn apply(state: &WizardState, event: Event) -> Result<(WizardState, Option<Effect>), LogoError> {
    let mut next = state.clone();

    match event {
        Event::SubmitName { name } => {
            expect_step(state, Step::NamingInput)?;
            let name = name.trim();
            if name.is_empty() {
                return Err(LogoError::Validation("Business name is required".into()));
            }
            next.business_name = name.to_string();
            next.step = Step::IndustrySelect;
        }

        Event::SelectIndustry { industry } => {
            expect_step(state, Step::IndustrySelect)?;
            next.industry = Some(Industry::try_from(industry.as_str())?);
            next.step = Step::StyleSelect;
        }

        Event::ToggleStyle { style } => {
            expect_step(state, Step::StyleSelect)?;
            let style = LogoStyle::try_from(style.as_str())?;
            match next.styles.iter().position(|s| *s == style) {
                Some(index) => {
                    next.styles.remove(index);
                }
                None => next.styles.push(style),
            }
        }

        Event::RequestGeneration { colors } => {
            expect_step(state, Step::StyleSelect)?;
            if state.is_generating {
                return Err(LogoError::Validation(
                    "A logo generation is already in progress".into(),
                ));
            }
            if state.styles.is_empty() {
                return Err(LogoError::Validation("Select at least one style".into()));
            }

            next.step = Step::OptionReview;
            next.options.clear();
            next.selected_logo = None;
            next.error = None;

            let industry = match (state.business_name.is_empty(), state.industry) {
                (false, Some(industry)) => industry,
                (true, _) => {
                    next.error =
                        Some(LogoError::Generation("Business name is required".into()).to_string());
                    return Ok((next, None));
                }
                (false, None) => {
                    next.error =
                        Some(LogoError::Generation("Industry is required".into()).to_string());
                    return Ok((next, None));
                }
            };

            next.generation_token = state.generation_token + 1;
            next.is_generating = true;
            let effect = Effect::GenerateConcepts {
                token: next.generation_token,
                request: ConceptRequest {
                    business_name: state.business_name.clone(),
                    industry,
                    styles: state.styles.clone(),
                    colors,
                },
            };
            return Ok((next, Some(effect)));
        }

        Event::GenerationSucceeded { token, options } => {
            if !awaiting(state, token) {
                return Ok((next, None));
            }
            next.options = options
                .into_iter()
                .map(|mut option| {
                    option.selected = false;
                    option
                })
                .collect();
            next.selected_logo = None;
            next.is_generating = false;
            next.error = None;
        }

        Event::GenerationFailed { token, message } => {
            if !awaiting(state, token) {
                return Ok((next, None));
            }
            next.is_generating = false;
            next.error = Some(message);
        }

        Event::SelectLogo { id } => {
            expect_step(state, Step::OptionReview)?;
            if !state.options.iter().any(|option| option.id == id) {
                return Err(LogoError::Selection(format!("Logo option {} not found", id)));
            }
            for option in next.options.iter_mut() {
                option.selected = option.id == id;
            }
            next.selected_logo = Some(id);
            next.error = None;
        }

        Event::ProceedToCustomize => {
            expect_step(state, Step::OptionReview)?;
            if !state.can_proceed() {
                return Err(LogoError::Validation(
                    "Select a logo before customizing".into(),
                ));
            }
            next.step = Step::Customize;
        }

        Event::SetCustomizationField { field, value } => {
            expect_step(state, Step::Customize)?;
            let value = value.trim();
            match field {
                CustomizationKey::Color => {
                    if !color::is_hex_color(value) {
                        return Err(LogoError::Validation(format!(
                            "Color must be a hex value like #4f46e5, got {}",
                            value
                        )));
                    }
                    next.customization.color = color::expand_hex(value);
                }
                CustomizationKey::Layout => {
                    next.customization.layout = Layout::try_from(value)?;
                }
                CustomizationKey::Typography => {
                    if value.is_empty() {
                        return Err(LogoError::Validation("Typography is required".into()));
                    }
                    next.customization.typography = value.to_string();
                }
            }
        }

        Event::SaveCustomization => {
            expect_step(state, Step::Customize)?;
            next.step = Step::OptionReview;
        }

        Event::GoBack => match state.step.previous() {
            Some(previous) => next.step = previous,
            None => {
                return Err(LogoError::Validation("Already at the first step".into()));
            }
        },

        Event::RequestDownload { format } => {
            let option = state.selected_option().ok_or_else(|| {
                LogoError::Selection("No logo selected for download".into())
            })?;
            let action = DownloadAction {
                url: option.image_url.clone(),
                filename: format!("{}-logo.{}", state.business_name, format.extension()),
                format,
            };
            return Ok((next, Some(Effect::Download(action))));
        }

        Event::Reset => {
            next = WizardState {
                generation_token: state.generation_token + 1,
                ..WizardState::default()
            };
        }
    }

    Ok((next, None))
}

fn expect_step(state: &WizardState, step: Step) -> Result<(), LogoError> {
    if state.step == step {
        Ok(())
    } else {
        Err(LogoError::Validation(format!(
            "Not allowed at step {} (expected {})",
            state.step, step
        )))
    }
}

// Completions only land on the request that is still outstanding.
fn awaiting(state: &WizardState, token: u64) -> bool {
    let current = state.is_generating && state.generation_token == token;
    if !current {
        debug!(
            "Ignoring stale generation result (token {}, current {}, in progress {})",
            token, state.generation_token, state.is_generating
        );
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DownloadFormat, LogoConcept, LogoOption};
    use std::collections::HashSet;

    fn run(state: &WizardState, event: Event) -> WizardState {
        transition(state, event).state
    }

    fn options(n: usize) -> Vec<LogoOption> {
        (1..=n)
            .map(|i| LogoOption {
                id: format!("logo-{}", i),
                image_url: format!("https://example.test/{}.png", i),
                selected: false,
                concept: Some(LogoConcept::new(format!("concept {}", i))),
            })
            .collect()
    }

    fn at_style_select(styles: &[&str]) -> WizardState {
        let mut state = run(
            &WizardState::new(),
            Event::SubmitName {
                name: "Zest Fission Inc".into(),
            },
        );
        state = run(
            &state,
            Event::SelectIndustry {
                industry: "tech".into(),
            },
        );
        for style in styles {
            state = run(
                &state,
                Event::ToggleStyle {
                    style: style.to_string(),
                },
            );
        }
        state
    }

    fn generated(n: usize) -> WizardState {
        let outcome = transition(
            &at_style_select(&["modern"]),
            Event::RequestGeneration { colors: None },
        );
        let token = outcome.state.generation_token;
        run(
            &outcome.state,
            Event::GenerationSucceeded {
                token,
                options: options(n),
            },
        )
    }

    #[test]
    fn blank_name_is_rejected() {
        let state = WizardState::new();
        let outcome = transition(&state, Event::SubmitName { name: "   ".into() });
        assert_eq!(outcome.state, state);
        assert!(matches!(outcome.rejection, Some(LogoError::Validation(_))));
    }

    #[test]
    fn name_is_trimmed_and_advances() {
        let state = run(
            &WizardState::new(),
            Event::SubmitName {
                name: "  Zest Fission Inc ".into(),
            },
        );
        assert_eq!(state.business_name, "Zest Fission Inc");
        assert_eq!(state.step, Step::IndustrySelect);
    }

    #[test]
    fn unknown_industry_is_rejected() {
        let state = run(
            &WizardState::new(),
            Event::SubmitName {
                name: "Zest".into(),
            },
        );
        let outcome = transition(
            &state,
            Event::SelectIndustry {
                industry: "mining".into(),
            },
        );
        assert!(outcome.rejection.is_some());
        assert_eq!(outcome.state.step, Step::IndustrySelect);
    }

    #[test]
    fn toggling_a_style_twice_restores_the_set() {
        let before = at_style_select(&["classic"]);
        let once = run(
            &before,
            Event::ToggleStyle {
                style: "modern".into(),
            },
        );
        assert_eq!(once.styles, vec![LogoStyle::Classic, LogoStyle::Modern]);
        let twice = run(
            &once,
            Event::ToggleStyle {
                style: "modern".into(),
            },
        );
        assert_eq!(twice.styles, before.styles);
    }

    #[test]
    fn can_generate_tracks_style_set() {
        let state = at_style_select(&[]);
        assert!(!state.can_generate());
        let state = run(
            &state,
            Event::ToggleStyle {
                style: "fun".into(),
            },
        );
        assert!(state.can_generate());
        let state = run(
            &state,
            Event::ToggleStyle {
                style: "fun".into(),
            },
        );
        assert!(!state.can_generate());
    }

    #[test]
    fn generation_with_no_styles_is_rejected_before_any_call() {
        let state = at_style_select(&[]);
        let outcome = transition(&state, Event::RequestGeneration { colors: None });
        assert_eq!(outcome.state, state);
        assert!(outcome.effect.is_none());
        assert!(!outcome.state.is_generating);
        assert!(matches!(outcome.rejection, Some(LogoError::Validation(_))));
    }

    #[test]
    fn generation_request_moves_to_review_and_emits_effect() {
        let state = at_style_select(&["modern"]);
        let outcome = transition(
            &state,
            Event::RequestGeneration {
                colors: Some(vec!["#10b981".into()]),
            },
        );
        assert_eq!(outcome.state.step, Step::OptionReview);
        assert!(outcome.state.is_generating);
        assert_eq!(outcome.state.generation_token, 1);
        match outcome.effect {
            Some(Effect::GenerateConcepts { token, request }) => {
                assert_eq!(token, 1);
                assert_eq!(request.business_name, "Zest Fission Inc");
                assert_eq!(request.industry, Industry::Tech);
                assert_eq!(request.styles, vec![LogoStyle::Modern]);
                assert_eq!(request.colors, Some(vec!["#10b981".to_string()]));
            }
            other => panic!("expected generation effect, got {:?}", other),
        }
    }

    #[test]
    fn second_generation_is_refused_while_in_progress() {
        let pending = transition(
            &at_style_select(&["modern"]),
            Event::RequestGeneration { colors: None },
        )
        .state;
        let back = run(&pending, Event::GoBack);
        assert_eq!(back.step, Step::StyleSelect);
        assert!(!back.can_generate());
        let outcome = transition(&back, Event::RequestGeneration { colors: None });
        assert!(outcome.rejection.is_some());
        assert!(outcome.effect.is_none());
    }

    #[test]
    fn missing_name_at_generation_records_error_without_effect() {
        let state = WizardState {
            step: Step::StyleSelect,
            industry: Some(Industry::Food),
            styles: vec![LogoStyle::Fun],
            ..WizardState::default()
        };
        let outcome = transition(&state, Event::RequestGeneration { colors: None });
        assert!(outcome.effect.is_none());
        assert!(outcome.rejection.is_none());
        assert_eq!(outcome.state.step, Step::OptionReview);
        assert!(!outcome.state.is_generating);
        assert_eq!(
            outcome.state.error.as_deref(),
            Some("Failed to generate logos: Business name is required")
        );
    }

    #[test]
    fn zest_fission_scenario() {
        let state = generated(4);
        assert_eq!(state.step, Step::OptionReview);
        assert_eq!(state.step.number(), 4);
        assert_eq!(state.options.len(), 4);
        assert!(state.error.is_none());
        assert!(!state.is_generating);
        let ids: HashSet<_> = state.options.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids.len(), 4);
        assert!(state.options.iter().all(|o| !o.selected));
    }

    #[test]
    fn failure_records_error_and_retry_clears_it() {
        let pending = transition(
            &at_style_select(&["modern"]),
            Event::RequestGeneration { colors: None },
        )
        .state;
        let failed = run(
            &pending,
            Event::GenerationFailed {
                token: pending.generation_token,
                message: "Failed to generate logos: quota exceeded".into(),
            },
        );
        assert!(!failed.is_generating);
        assert_eq!(
            failed.error.as_deref(),
            Some("Failed to generate logos: quota exceeded")
        );

        let retry = transition(
            &run(&failed, Event::GoBack),
            Event::RequestGeneration { colors: None },
        );
        assert!(retry.state.error.is_none());
        assert_eq!(retry.state.generation_token, 2);
    }

    #[test]
    fn stale_results_are_ignored() {
        let pending = transition(
            &at_style_select(&["modern"]),
            Event::RequestGeneration { colors: None },
        )
        .state;
        let token = pending.generation_token;
        let reset = run(&pending, Event::Reset);
        assert_eq!(reset.step, Step::NamingInput);
        assert!(reset.generation_token > token);

        let after = run(
            &reset,
            Event::GenerationSucceeded {
                token,
                options: options(4),
            },
        );
        assert_eq!(after, reset);

        let not_pending = generated(4);
        let duplicate = run(
            &not_pending,
            Event::GenerationSucceeded {
                token: not_pending.generation_token,
                options: options(2),
            },
        );
        assert_eq!(duplicate.options.len(), 4);
    }

    #[test]
    fn selecting_marks_exactly_one_option() {
        let state = generated(4);
        let state = run(&state, Event::SelectLogo { id: "logo-2".into() });
        let state = run(&state, Event::SelectLogo { id: "logo-3".into() });
        let selected: Vec<_> = state.options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, "logo-3");
        assert_eq!(state.selected_logo.as_deref(), Some("logo-3"));
    }

    #[test]
    fn selecting_unknown_id_only_records_error() {
        let state = run(&generated(4), Event::SelectLogo { id: "logo-1".into() });
        let after = run(&state, Event::SelectLogo { id: "logo-42".into() });
        assert_eq!(after.error.as_deref(), Some("Logo option logo-42 not found"));
        assert_eq!(
            WizardState {
                error: None,
                ..after
            },
            state
        );
    }

    #[test]
    fn proceed_requires_a_selection() {
        let state = generated(4);
        let outcome = transition(&state, Event::ProceedToCustomize);
        assert!(outcome.rejection.is_some());
        assert_eq!(outcome.state.step, Step::OptionReview);

        let state = run(&state, Event::SelectLogo { id: "logo-1".into() });
        let state = run(&state, Event::ProceedToCustomize);
        assert_eq!(state.step, Step::Customize);
    }

    #[test]
    fn customization_updates_and_save_returns_to_review() {
        let mut state = run(&generated(4), Event::SelectLogo { id: "logo-1".into() });
        state = run(&state, Event::ProceedToCustomize);
        state = run(
            &state,
            Event::SetCustomizationField {
                field: CustomizationKey::Color,
                value: "#EF4444".into(),
            },
        );
        state = run(
            &state,
            Event::SetCustomizationField {
                field: CustomizationKey::Layout,
                value: "horizontal".into(),
            },
        );
        state = run(
            &state,
            Event::SetCustomizationField {
                field: CustomizationKey::Typography,
                value: "serif".into(),
            },
        );
        assert_eq!(state.customization.color, "#EF4444");
        assert_eq!(state.customization.layout, Layout::Horizontal);
        assert_eq!(state.customization.typography, "serif");

        let bad = transition(
            &state,
            Event::SetCustomizationField {
                field: CustomizationKey::Color,
                value: "red".into(),
            },
        );
        assert!(bad.rejection.is_some());
        assert_eq!(bad.state.customization.color, "#EF4444");

        let saved = run(&state, Event::SaveCustomization);
        assert_eq!(saved.step, Step::OptionReview);
        assert_eq!(saved.customization, state.customization);
    }

    #[test]
    fn shorthand_color_is_stored_expanded() {
        let mut state = run(&generated(4), Event::SelectLogo { id: "logo-1".into() });
        state = run(&state, Event::ProceedToCustomize);
        state = run(
            &state,
            Event::SetCustomizationField {
                field: CustomizationKey::Color,
                value: " #fff ".into(),
            },
        );
        assert_eq!(state.customization.color, "#ffffff");
        assert_eq!(color::preview_background(&state.customization.color), "#ffffff20");
    }

    #[test]
    fn download_without_selection_records_error() {
        let state = generated(4);
        let outcome = transition(
            &state,
            Event::RequestDownload {
                format: DownloadFormat::Png,
            },
        );
        assert!(outcome.effect.is_none());
        assert_eq!(
            outcome.state.error.as_deref(),
            Some("No logo selected for download")
        );
    }

    #[test]
    fn download_names_file_after_business() {
        let state = run(&generated(4), Event::SelectLogo { id: "logo-2".into() });
        let outcome = transition(
            &state,
            Event::RequestDownload {
                format: DownloadFormat::Svg,
            },
        );
        match outcome.effect {
            Some(Effect::Download(action)) => {
                assert_eq!(action.filename, "Zest Fission Inc-logo.svg");
                assert_eq!(action.url, "https://example.test/2.png");
                assert_eq!(action.format, DownloadFormat::Svg);
            }
            other => panic!("expected download effect, got {:?}", other),
        }
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn back_is_refused_on_first_step() {
        let outcome = transition(&WizardState::new(), Event::GoBack);
        assert!(outcome.rejection.is_some());
        assert_eq!(outcome.state.step, Step::NamingInput);
    }

    #[test]
    fn step_stays_in_bounds_for_any_event_sequence() {
        let events = [
            Event::SubmitName { name: "Zest".into() },
            Event::SubmitName { name: "".into() },
            Event::SelectIndustry {
                industry: "health".into(),
            },
            Event::ToggleStyle {
                style: "minimal".into(),
            },
            Event::RequestGeneration { colors: None },
            Event::GenerationSucceeded {
                token: 1,
                options: options(4),
            },
            Event::GenerationFailed {
                token: 2,
                message: "boom".into(),
            },
            Event::SelectLogo { id: "logo-1".into() },
            Event::ProceedToCustomize,
            Event::SaveCustomization,
            Event::GoBack,
            Event::GoBack,
            Event::RequestDownload {
                format: DownloadFormat::Png,
            },
        ];

        // Small LCG so the walk is deterministic.
        let mut seed: u64 = 0x5eed;
        for _ in 0..200 {
            let mut state = WizardState::new();
            for _ in 0..40 {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let event = events[(seed >> 33) as usize % events.len()].clone();
                state = transition(&state, event).state;
                assert!((1..=5).contains(&state.step.number()));
                assert!(state.options.iter().filter(|o| o.selected).count() <= 1);
                if state.step == Step::Customize {
                    assert!(state.selected_option().is_some());
                }
            }
        }
    }
}
