//! The viewer's `Loading -> Ready` state machine.
//!
//! ```text
//!            load_succeeded / load_failed
//! Loading ---------------------------------> Ready(roster, selection, evolution)
//!                                              |  ^
//!                                   select*    |  |  evolution_resolved
//!                                              v  |
//!                                            Ready(.., Pending)
//! ```
//!
//! Every selection change bumps a generation counter and hands out a
//! [`ResolveTicket`] carrying it. Evolution results are applied only if their
//! ticket is still current, so a slow resolution for an earlier selection
//! can never overwrite the result for a later one.

use pokedex_types::{Pokemon, PokemonId};
use tracing::debug;

/// Errors from an invalid state transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Selection was attempted before the roster finished loading.
    #[error("roster is still loading")]
    NotReady,

    /// The roster was already loaded once this session.
    #[error("roster already loaded")]
    AlreadyLoaded,

    /// The roster is empty, so nothing can be selected.
    #[error("roster is empty")]
    EmptyRoster,

    /// No roster entry has this id.
    #[error("{0} is not in the roster")]
    UnknownPokemon(PokemonId),

    /// No roster entry has this name.
    #[error("no Pokemon named {0:?} in the roster")]
    UnknownName(String),
}

/// Identifies one evolution resolution. Only the latest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveTicket {
    generation: u64,
    pokemon_id: PokemonId,
}

impl ResolveTicket {
    /// The entity this resolution was started for.
    pub const fn pokemon_id(&self) -> PokemonId {
        self.pokemon_id
    }

    /// Selection generation at the time the resolution started.
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// A resolution the caller must start: resolve `pokemon`, then report back
/// with `ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Tag to pass to [`Session::evolution_resolved`].
    pub ticket: ResolveTicket,
    /// The newly selected entity.
    pub pokemon: Pokemon,
}

/// Evolution panel contents for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evolution {
    /// A resolution is in flight.
    Pending,
    /// Flattened names; empty when the chain could not be resolved.
    Resolved(Vec<String>),
}

impl Evolution {
    /// Resolved names, or `None` while pending.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::Pending => None,
            Self::Resolved(names) => Some(names.as_slice()),
        }
    }
}

/// Steady state once the roster load has finished, successfully or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ready {
    roster: Vec<Pokemon>,
    selected: Option<usize>,
    evolution: Evolution,
    load_error: Option<String>,
}

impl Ready {
    /// The loaded roster in ascending id order. Empty after a failed load.
    pub fn roster(&self) -> &[Pokemon] {
        &self.roster
    }

    /// The selected entity, if any.
    pub fn selected(&self) -> Option<&Pokemon> {
        self.selected.and_then(|index| self.roster.get(index))
    }

    /// Evolution panel contents for the selection.
    pub const fn evolution(&self) -> &Evolution {
        &self.evolution
    }

    /// Why the roster failed to load, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

/// Top-level render state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the roster.
    Loading,
    /// Roster load finished.
    Ready(Ready),
}

/// Owner of all mutable viewer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    phase: Phase,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session in the `Loading` phase.
    pub const fn new() -> Self {
        Self {
            phase: Phase::Loading,
            generation: 0,
        }
    }

    /// Current phase, for rendering.
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The `Ready` state, or `None` while loading.
    pub const fn ready(&self) -> Option<&Ready> {
        match &self.phase {
            Phase::Loading => None,
            Phase::Ready(ready) => Some(ready),
        }
    }

    /// Whether `ticket` still matches the current selection.
    pub fn is_current(&self, ticket: ResolveTicket) -> bool {
        ticket.generation == self.generation
            && self
                .ready()
                .and_then(Ready::selected)
                .is_some_and(|pokemon| pokemon.id == ticket.pokemon_id)
    }

    /// The roster arrived. Selects the first entity and returns the
    /// resolution to start for it (`None` for an empty roster).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyLoaded`] if the session is not loading.
    pub fn load_succeeded(
        &mut self,
        roster: Vec<Pokemon>,
    ) -> Result<Option<ResolveRequest>, SessionError> {
        self.ensure_loading()?;
        let empty = roster.is_empty();
        self.phase = Phase::Ready(Ready {
            roster,
            selected: None,
            evolution: Evolution::Resolved(Vec::new()),
            load_error: None,
        });
        if empty {
            return Ok(None);
        }
        self.select_index(0).map(Some)
    }

    /// The roster failed to load. Degrades to an empty `Ready` state that
    /// remembers why.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyLoaded`] if the session is not loading.
    pub fn load_failed(&mut self, reason: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_loading()?;
        self.phase = Phase::Ready(Ready {
            roster: Vec::new(),
            selected: None,
            evolution: Evolution::Resolved(Vec::new()),
            load_error: Some(reason.into()),
        });
        Ok(())
    }

    /// Select a roster entry by id. Reselecting the current entry starts a
    /// new resolution all the same.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotReady`] while loading and
    /// [`SessionError::UnknownPokemon`] if `id` is not in the roster.
    pub fn select(&mut self, id: PokemonId) -> Result<ResolveRequest, SessionError> {
        let index = self
            .ready_or_err()?
            .roster
            .iter()
            .position(|pokemon| pokemon.id == id)
            .ok_or(SessionError::UnknownPokemon(id))?;
        self.select_index(index)
    }

    /// Select a roster entry by name, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotReady`] while loading and
    /// [`SessionError::UnknownName`] if no entry matches.
    pub fn select_by_name(&mut self, name: &str) -> Result<ResolveRequest, SessionError> {
        let index = self
            .ready_or_err()?
            .roster
            .iter()
            .position(|pokemon| pokemon.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| SessionError::UnknownName(name.to_owned()))?;
        self.select_index(index)
    }

    /// Select the entry after the current one, wrapping to the first.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotReady`] while loading and
    /// [`SessionError::EmptyRoster`] if there is nothing to select.
    pub fn select_next(&mut self) -> Result<ResolveRequest, SessionError> {
        let ready = self.ready_or_err()?;
        let len = ready.roster.len();
        if len == 0 {
            return Err(SessionError::EmptyRoster);
        }
        let index = ready
            .selected
            .map_or(0, |current| current.saturating_add(1) % len);
        self.select_index(index)
    }

    /// Select the entry before the current one, wrapping to the last.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotReady`] while loading and
    /// [`SessionError::EmptyRoster`] if there is nothing to select.
    pub fn select_previous(&mut self) -> Result<ResolveRequest, SessionError> {
        let ready = self.ready_or_err()?;
        let Some(last) = ready.roster.len().checked_sub(1) else {
            return Err(SessionError::EmptyRoster);
        };
        let index = match ready.selected {
            Some(0) | None => last,
            Some(current) => current.saturating_sub(1),
        };
        self.select_index(index)
    }

    /// A resolution finished. Applies `names` if `ticket` is still current
    /// and reports whether it was applied.
    pub fn evolution_resolved(&mut self, ticket: ResolveTicket, names: Vec<String>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                pokemon_id = ticket.pokemon_id.into_inner(),
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale evolution result"
            );
            return false;
        }
        if let Phase::Ready(ready) = &mut self.phase {
            ready.evolution = Evolution::Resolved(names);
        }
        true
    }

    fn ensure_loading(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Loading => Ok(()),
            Phase::Ready(_) => Err(SessionError::AlreadyLoaded),
        }
    }

    const fn ready_or_err(&self) -> Result<&Ready, SessionError> {
        match &self.phase {
            Phase::Loading => Err(SessionError::NotReady),
            Phase::Ready(ready) => Ok(ready),
        }
    }

    fn select_index(&mut self, index: usize) -> Result<ResolveRequest, SessionError> {
        let Phase::Ready(ready) = &mut self.phase else {
            return Err(SessionError::NotReady);
        };
        let pokemon = ready
            .roster
            .get(index)
            .cloned()
            .ok_or(SessionError::EmptyRoster)?;

        self.generation = self.generation.wrapping_add(1);
        ready.selected = Some(index);
        ready.evolution = Evolution::Pending;

        Ok(ResolveRequest {
            ticket: ResolveTicket {
                generation: self.generation,
                pokemon_id: pokemon.id,
            },
            pokemon,
        })
    }
}

#[cfg(test)]
mod tests {
    use pokedex_types::NamedResource;

    use super::*;

    fn pokemon(id: u32, name: &str) -> Pokemon {
        Pokemon {
            id: PokemonId(id),
            name: name.to_owned(),
            sprites: pokedex_types::Sprites::default(),
            abilities: Vec::new(),
            stats: Vec::new(),
            species: NamedResource::new(name, format!("https://example.test/pokemon-species/{id}/")),
        }
    }

    fn roster() -> Vec<Pokemon> {
        vec![
            pokemon(1, "bulbasaur"),
            pokemon(2, "ivysaur"),
            pokemon(3, "venusaur"),
        ]
    }

    fn loaded() -> (Session, ResolveRequest) {
        let mut session = Session::new();
        let request = session.load_succeeded(roster()).ok().flatten();
        assert!(request.is_some(), "non-empty roster should request a resolution");
        let Some(request) = request else {
            return (session, dummy_request());
        };
        (session, request)
    }

    fn dummy_request() -> ResolveRequest {
        ResolveRequest {
            ticket: ResolveTicket {
                generation: 0,
                pokemon_id: PokemonId(0),
            },
            pokemon: pokemon(0, "missingno"),
        }
    }

    fn selected_name(session: &Session) -> Option<&str> {
        session
            .ready()
            .and_then(Ready::selected)
            .map(|p| p.name.as_str())
    }

    #[test]
    fn starts_loading_and_rejects_selection() {
        let mut session = Session::new();
        assert_eq!(session.phase(), &Phase::Loading);
        assert_eq!(session.select(PokemonId(1)), Err(SessionError::NotReady));
        assert_eq!(session.select_next(), Err(SessionError::NotReady));
    }

    #[test]
    fn load_selects_first_and_requests_its_evolutions() {
        let (session, request) = loaded();
        assert_eq!(request.pokemon.name, "bulbasaur");
        assert_eq!(request.ticket.pokemon_id(), PokemonId(1));
        assert_eq!(selected_name(&session), Some("bulbasaur"));
        assert_eq!(
            session.ready().map(Ready::evolution),
            Some(&Evolution::Pending)
        );
    }

    #[test]
    fn roster_loads_only_once() {
        let (mut session, _) = loaded();
        assert_eq!(
            session.load_succeeded(roster()),
            Err(SessionError::AlreadyLoaded)
        );
        assert_eq!(session.load_failed("late"), Err(SessionError::AlreadyLoaded));
    }

    #[test]
    fn failed_load_degrades_to_empty_ready() {
        let mut session = Session::new();
        assert_eq!(session.load_failed("503 from /pokemon/7"), Ok(()));

        let ready = session.ready();
        assert!(ready.is_some());
        let Some(ready) = ready else { return };
        assert!(ready.roster().is_empty());
        assert!(ready.selected().is_none());
        assert_eq!(ready.evolution(), &Evolution::Resolved(Vec::new()));
        assert_eq!(ready.load_error(), Some("503 from /pokemon/7"));
        assert_eq!(session.select_next(), Err(SessionError::EmptyRoster));
        assert_eq!(session.select_previous(), Err(SessionError::EmptyRoster));
    }

    #[test]
    fn empty_roster_selects_nothing() {
        let mut session = Session::new();
        assert_eq!(session.load_succeeded(Vec::new()), Ok(None));
        assert!(session.ready().and_then(Ready::selected).is_none());
    }

    #[test]
    fn current_result_is_applied() {
        let (mut session, request) = loaded();
        let names = vec!["bulbasaur".to_owned(), "ivysaur".to_owned(), "venusaur".to_owned()];

        assert!(session.evolution_resolved(request.ticket, names.clone()));
        assert_eq!(
            session.ready().map(Ready::evolution),
            Some(&Evolution::Resolved(names))
        );
    }

    #[test]
    fn stale_result_never_overwrites_newer_selection() {
        let (mut session, first) = loaded();
        let second = session.select(PokemonId(3));
        assert!(second.is_ok());
        let Ok(second) = second else { return };

        // The later selection resolves first...
        assert!(session.evolution_resolved(second.ticket, vec!["venusaur-line".to_owned()]));
        // ...then the earlier one straggles in and must be dropped.
        assert!(!session.evolution_resolved(first.ticket, vec!["stale".to_owned()]));

        assert_eq!(selected_name(&session), Some("venusaur"));
        assert_eq!(
            session.ready().map(Ready::evolution),
            Some(&Evolution::Resolved(vec!["venusaur-line".to_owned()]))
        );
    }

    #[test]
    fn stale_result_is_dropped_while_newer_is_pending() {
        let (mut session, first) = loaded();
        assert!(session.select(PokemonId(2)).is_ok());

        assert!(!session.evolution_resolved(first.ticket, vec!["stale".to_owned()]));
        assert_eq!(
            session.ready().map(Ready::evolution),
            Some(&Evolution::Pending)
        );
    }

    #[test]
    fn reselecting_same_entity_issues_new_ticket() {
        let (mut session, first) = loaded();
        let again = session.select(PokemonId(1));
        assert!(again.is_ok());
        let Ok(again) = again else { return };

        assert_eq!(again.ticket.pokemon_id(), first.ticket.pokemon_id());
        assert!(again.ticket.generation() > first.ticket.generation());
        assert!(!session.is_current(first.ticket));
        assert!(session.is_current(again.ticket));
    }

    #[test]
    fn unknown_selections_leave_state_untouched() {
        let (mut session, request) = loaded();
        assert_eq!(
            session.select(PokemonId(99)),
            Err(SessionError::UnknownPokemon(PokemonId(99)))
        );
        assert_eq!(
            session.select_by_name("mew"),
            Err(SessionError::UnknownName("mew".to_owned()))
        );
        assert!(session.is_current(request.ticket));
        assert_eq!(selected_name(&session), Some("bulbasaur"));
    }

    #[test]
    fn select_by_name_ignores_case() {
        let (mut session, _) = loaded();
        let request = session.select_by_name("IvySaur");
        assert!(request.is_ok());
        assert_eq!(selected_name(&session), Some("ivysaur"));
    }

    #[test]
    fn next_and_previous_wrap() {
        let (mut session, _) = loaded();

        assert!(session.select_previous().is_ok());
        assert_eq!(selected_name(&session), Some("venusaur"));

        assert!(session.select_next().is_ok());
        assert_eq!(selected_name(&session), Some("bulbasaur"));

        assert!(session.select_next().is_ok());
        assert_eq!(selected_name(&session), Some("ivysaur"));

        assert!(session.select_previous().is_ok());
        assert_eq!(selected_name(&session), Some("bulbasaur"));
    }

    #[test]
    fn single_stage_and_failed_resolution_are_distinct_values() {
        let (mut session, request) = loaded();
        assert!(session.evolution_resolved(request.ticket, vec!["bulbasaur".to_owned()]));
        let single = session.ready().map(|r| r.evolution().clone());

        let again = session.select(PokemonId(1));
        let Ok(again) = again else { return };
        assert!(session.evolution_resolved(again.ticket, Vec::new()));
        let failed = session.ready().map(|r| r.evolution().clone());

        assert_eq!(single.as_ref().and_then(Evolution::names).map(<[String]>::len), Some(1));
        assert_eq!(failed.as_ref().and_then(Evolution::names).map(<[String]>::len), Some(0));
        assert_ne!(single, failed);
    }
}
