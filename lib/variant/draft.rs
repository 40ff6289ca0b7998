use crate::chess::{Board, Color, Geometry, Piece, Placement, Sides, Square, Tint};
use crate::variant::{Army, Catalog, EditError, EndCondition, Member, Objective, Obstruction};
use crate::variant::{Promotions, Record, Registry, Rules, ValidationError, ValidationErrors};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write};
use tracing::{debug, instrument, warn};

/// A chess variant being edited.
///
/// Every square holds at most one [`Piece`] and every piece is listed on exactly one team,
/// the one matching its [`Color`].
/// Operations that fail leave the draft untouched.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Draft<R: Registry = Catalog> {
    name: String,
    boards: Vec<Board>,
    occupancy: BTreeMap<Placement, Piece>,
    rosters: [BTreeSet<Placement>; 2],
    rules: [Rules; 2],
    promotions: [Promotions; 2],
    registry: R,
}

impl Default for Draft {
    fn default() -> Self {
        Draft::new(Catalog::default())
    }
}

impl<R: Registry> Draft<R> {
    /// A blank variant with a single standard board.
    pub fn new(registry: R) -> Self {
        Draft {
            name: String::new(),
            boards: vec![Board::default()],
            occupancy: BTreeMap::new(),
            rosters: Default::default(),
            rules: Default::default(),
            promotions: Default::default(),
            registry,
        }
    }

    /// Resumes editing a saved variant.
    #[instrument(level = "debug", skip(registry, record), fields(name = record.name()))]
    pub fn load(registry: R, record: Record) -> Self {
        let mut draft = Draft {
            name: record.name().to_string(),
            boards: record.boards().to_vec(),
            occupancy: BTreeMap::new(),
            rosters: Default::default(),
            rules: Default::default(),
            promotions: Default::default(),
            registry,
        };

        for c in Color::iter() {
            let army = record.army(c);
            draft.rules[c as usize] = army.rules.clone();
            draft.promotions[c as usize] = army.promotions.clone();

            for m in &army.team {
                if draft.registry.resolve(&m.name).is_none() {
                    warn!(piece = %m.name, at = %m.placement, "unregistered piece type");
                }

                draft.insert(m.placement, Piece::new(m.name.clone(), c));
            }
        }

        draft
    }

    /// The name this variant was loaded or last saved with, if any.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Changes the name this variant is known by.
    pub fn rename(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    /// The boards in order.
    #[inline(always)]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The piece registry.
    #[inline(always)]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// The [`Piece`] on a square, if any.
    #[inline(always)]
    pub fn piece(&self, at: Placement) -> Option<&Piece> {
        self.occupancy.get(&at)
    }

    /// The team of a [`Color`], ordered by [`Placement`].
    pub fn team(&self, c: Color) -> impl Iterator<Item = (Placement, &Piece)> + '_ {
        self.rosters[c as usize]
            .iter()
            .filter_map(|at| Some((*at, self.occupancy.get(at)?)))
    }

    /// The [`Rules`] of a [`Color`].
    #[inline(always)]
    pub fn rules(&self, c: Color) -> &Rules {
        &self.rules[c as usize]
    }

    /// The [`Promotions`] of a [`Color`].
    #[inline(always)]
    pub fn promotions(&self, c: Color) -> &Promotions {
        &self.promotions[c as usize]
    }

    fn board(&self, at: Placement) -> Result<&Board, EditError> {
        match self.boards.get(at.board) {
            Some(b) if b.contains(at.square) => Ok(b),
            _ => Err(EditError::InvalidPlacement {
                at,
                reason: Obstruction::OutOfBounds,
            }),
        }
    }

    fn vacancy(&self, at: Placement) -> Result<(), EditError> {
        let reason = if !self.board(at)?.is_habitable(at.square) {
            Obstruction::Uninhabitable
        } else if self.occupancy.contains_key(&at) {
            Obstruction::Occupied
        } else {
            return Ok(());
        };

        Err(EditError::InvalidPlacement { at, reason })
    }

    fn insert(&mut self, at: Placement, piece: Piece) {
        debug_assert!(!self.occupancy.contains_key(&at));
        self.rosters[piece.color() as usize].insert(at);
        self.occupancy.insert(at, piece);
    }

    fn take(&mut self, at: Placement) -> Option<Piece> {
        let piece = self.occupancy.remove(&at)?;
        self.rosters[piece.color() as usize].remove(&at);
        Some(piece)
    }

    /// Places a new piece of a registered type on a free, habitable square.
    #[instrument(level = "debug", skip(self), err)]
    pub fn place(&mut self, name: &str, color: Color, at: Placement) -> Result<Piece, EditError> {
        let Some(kind) = self.registry.resolve(name) else {
            return Err(EditError::UnknownPieceType {
                name: name.to_string(),
            });
        };

        self.vacancy(at)?;
        let piece = Piece::new(kind.name, color);
        self.insert(at, piece.clone());
        Ok(piece)
    }

    /// Takes the piece off a square, if there is one.
    #[instrument(level = "debug", skip(self), err)]
    pub fn remove(&mut self, at: Placement) -> Result<Option<Piece>, EditError> {
        self.board(at)?;
        Ok(self.take(at))
    }

    /// Moves the piece on `from` to `to`, if there is one.
    ///
    /// The destination must be free and habitable, otherwise nothing moves.
    #[instrument(level = "debug", skip(self), err)]
    pub fn relocate(&mut self, from: Placement, to: Placement) -> Result<Option<Piece>, EditError> {
        self.board(from)?;

        let Some(piece) = self.occupancy.get(&from).cloned() else {
            debug!("nothing to move");
            return Ok(None);
        };

        if from != to {
            self.vacancy(to)?;
            self.take(from);
            self.insert(to, piece.clone());
        }

        Ok(Some(piece))
    }

    /// Changes the attributes of a square.
    ///
    /// An occupied square has to be cleared before it can be made uninhabitable.
    #[instrument(level = "debug", skip(self), err)]
    pub fn set_square(
        &mut self,
        at: Placement,
        habitable: bool,
        tint: Option<Tint>,
    ) -> Result<(), EditError> {
        self.board(at)?;

        if tint == Some(Tint::HIGHLIGHT) {
            return Err(EditError::ReservedTint { at });
        } else if !habitable && self.occupancy.contains_key(&at) {
            return Err(EditError::SquareOccupied { at });
        }

        if let Some(cell) = self.boards[at.board].cell_mut(at.square) {
            cell.habitable = habitable;
            cell.tint = tint;
        }

        Ok(())
    }

    /// Replaces the promotion targets of a piece type.
    #[instrument(level = "debug", skip(self))]
    pub fn set_promotions(&mut self, name: &str, targets: Vec<String>, sides: Sides) {
        for &c in sides.colors() {
            self.promotions[c as usize].set(name, targets.clone());
        }
    }

    /// Chooses the objective piece type, or the classic objective if `name` is blank.
    #[instrument(level = "debug", skip(self))]
    pub fn set_objective(&mut self, name: &str, sides: Sides) {
        for &c in sides.colors() {
            self.rules[c as usize].objective = Some(Objective::named(name));
        }
    }

    /// Appends a condition that ends the game.
    #[instrument(level = "debug", skip(self))]
    pub fn add_condition(&mut self, condition: EndCondition, sides: Sides) {
        for &c in sides.colors() {
            self.rules[c as usize].conditions.push(condition.clone());
        }
    }

    /// Forgets every condition that ends the game.
    #[instrument(level = "debug", skip(self))]
    pub fn clear_conditions(&mut self, sides: Sides) {
        for &c in sides.colors() {
            self.rules[c as usize].conditions.clear();
        }
    }

    /// Replaces the boards, returning the pieces that no longer fit.
    ///
    /// Squares that exist both before and after keep their attributes and pieces.
    #[instrument(level = "debug", skip(self), err)]
    pub fn reshape(
        &mut self,
        geometries: Vec<Geometry>,
    ) -> Result<Vec<(Placement, Piece)>, EditError> {
        if geometries.is_empty() {
            return Err(EditError::NoBoards);
        }

        let boards: Vec<_> = geometries
            .into_iter()
            .enumerate()
            .map(|(i, g)| match self.boards.get(i) {
                Some(b) => b.reshape(g),
                None => Board::new(g),
            })
            .collect();

        let stale: Vec<_> = self
            .occupancy
            .keys()
            .filter(|at| !boards.get(at.board).is_some_and(|b| b.is_habitable(at.square)))
            .copied()
            .collect();

        self.boards = boards;

        let dropped: Vec<_> = stale
            .into_iter()
            .filter_map(|at| Some((at, self.take(at)?)))
            .collect();

        debug!(dropped = dropped.len());
        Ok(dropped)
    }

    /// Checks the variant and, if every rule holds, captures it as a [`Record`].
    ///
    /// A named objective must be fielded exactly once by its team.
    /// Pieces without an entry in their team's promotion map don't promote.
    #[instrument(level = "debug", skip(self), err)]
    pub fn validate(&self, name: &str) -> Result<Record, ValidationErrors> {
        let name = name.trim();
        let mut errors = Vec::new();

        if name.is_empty() {
            errors.push(ValidationError::EmptyName);
        }

        for c in Color::iter() {
            let Some(Objective::Piece(objective)) = &self.rules(c).objective else {
                continue;
            };

            match self.team(c).filter(|(_, p)| p.name() == objective).count() {
                1 => {}
                0 => errors.push(ValidationError::MissingObjective {
                    color: c,
                    name: objective.clone(),
                }),
                count => errors.push(ValidationError::DuplicateObjective {
                    color: c,
                    name: objective.clone(),
                    count,
                }),
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors));
        }

        let army = |c: Color| Army {
            rules: self.rules(c).finalize(),
            promotions: self.promotions(c).clone(),
            team: self
                .team(c)
                .map(|(at, p)| Member {
                    name: p.name().to_string(),
                    placement: at,
                    promotes_to: self.promotions(c).resolve(p.name()),
                })
                .collect(),
        };

        let record = Record::new(
            name.to_string(),
            self.boards.clone(),
            army(Color::White),
            army(Color::Black),
        );

        debug!(name, "variant is valid");
        Ok(record)
    }
}

/// Draws every board top row first.
///
/// White pieces are shown by the uppercase initial of their type and black pieces by the
/// lowercase one, uninhabitable squares as `#` and free squares as `.`.
impl<R: Registry> fmt::Display for Draft<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, board) in self.boards.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }

            writeln!(f, "board {} ({})", i, board.geometry())?;
            let geometry = board.geometry();
            for row in (0..geometry.rows()).rev() {
                for column in 0..geometry.columns() {
                    let at = Placement::new(i, Square::new(row, column));
                    let symbol = match self.piece(at) {
                        Some(p) => {
                            let initial = p.name().chars().next().unwrap_or('?');
                            match p.color() {
                                Color::White => initial.to_ascii_uppercase(),
                                Color::Black => initial.to_ascii_lowercase(),
                            }
                        }

                        None if board.is_habitable(at.square) => '.',
                        None => '#',
                    };

                    f.write_char(symbol)?;
                }

                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{Kind, MockRegistry, PieceType};
    use proptest::{prelude::*, sample::select};
    use test_strategy::proptest;

    fn at(board: usize, row: u8, column: u8) -> Placement {
        Placement::new(board, Square::new(row, column))
    }

    fn placement() -> impl Strategy<Value = Placement> {
        (0usize..3, 0u8..10, 0u8..10).prop_map(|(b, r, c)| at(b, r, c))
    }

    fn piece_type() -> impl Strategy<Value = String> {
        select(&["King", "Queen", "Pawn", "Amazon"][..]).prop_map(String::from)
    }

    #[derive(Debug, Clone, test_strategy::Arbitrary)]
    enum Edit {
        Place(
            #[strategy(piece_type())] String,
            Color,
            #[strategy(placement())] Placement,
        ),
        Remove(#[strategy(placement())] Placement),
        Relocate(
            #[strategy(placement())] Placement,
            #[strategy(placement())] Placement,
        ),
        Square(#[strategy(placement())] Placement, bool),
    }

    fn apply(d: &mut Draft, e: Edit) -> Result<(), EditError> {
        match e {
            Edit::Place(n, c, at) => d.place(&n, c, at).map(drop),
            Edit::Remove(at) => d.remove(at).map(drop),
            Edit::Relocate(from, to) => d.relocate(from, to).map(drop),
            Edit::Square(at, habitable) => d.set_square(at, habitable, None),
        }
    }

    fn assert_consistent<R: Registry>(d: &Draft<R>) {
        for (at, p) in &d.occupancy {
            assert!(d.rosters[p.color() as usize].contains(at));
            assert!(!d.rosters[!p.color() as usize].contains(at));
            assert!(d.boards[at.board].is_habitable(at.square));
        }

        for c in Color::iter() {
            for at in &d.rosters[c as usize] {
                assert_eq!(d.occupancy.get(at).map(Piece::color), Some(c));
            }
        }

        let listed: usize = d.rosters.iter().map(BTreeSet::len).sum();
        assert_eq!(listed, d.occupancy.len());
    }

    fn two_boards() -> Draft {
        let mut d = Draft::new(Catalog::new(["Amazon"]));
        let small = Geometry::new(6, 6).unwrap();
        d.reshape(vec![Geometry::default(), small]).unwrap();
        d
    }

    #[proptest]
    fn teams_and_board_never_diverge(
        #[strategy(proptest::collection::vec(any::<Edit>(), 0..64))] edits: Vec<Edit>,
    ) {
        let mut d = two_boards();

        for e in edits {
            let before = d.clone();
            if apply(&mut d, e).is_err() {
                assert_eq!(d, before);
            }

            assert_consistent(&d);
        }
    }

    #[test]
    fn new_draft_has_a_single_empty_standard_board() {
        let d = Draft::default();
        assert_eq!(d.boards(), [Board::default()]);
        assert_eq!(d.team(Color::White).count(), 0);
        assert_eq!(d.team(Color::Black).count(), 0);
        assert_eq!(d.rules(Color::White), &Rules::default());
        assert_eq!(d.rules(Color::Black), &Rules::default());
    }

    #[proptest]
    fn place_adds_piece_to_board_and_team(
        #[strategy(piece_type())] n: String,
        c: Color,
        #[strategy(0u8..8)] r: u8,
        #[strategy(0u8..8)] f: u8,
    ) {
        let mut d = Draft::new(Catalog::new(["Amazon"]));
        let p = d.place(&n, c, at(0, r, f))?;

        assert_eq!(p, Piece::new(n, c));
        assert_eq!(d.piece(at(0, r, f)), Some(&p));
        assert_eq!(Vec::from_iter(d.team(c)), [(at(0, r, f), &p)]);
        assert_eq!(d.team(!c).count(), 0);
    }

    #[proptest]
    fn place_fails_for_unregistered_piece_type(c: Color, #[strategy("[a-z]{3,8}")] n: String) {
        let mut d = Draft::default();
        assert_eq!(
            d.place(&n, c, at(0, 0, 0)),
            Err(EditError::UnknownPieceType { name: n })
        );

        assert_eq!(d, Draft::default());
    }

    #[proptest]
    fn place_consults_registry(c: Color) {
        let mut registry = MockRegistry::new();
        registry.expect_resolve().times(1).returning(|n| {
            Some(PieceType {
                name: n.to_string(),
                kind: Kind::Custom,
            })
        });

        let mut d = Draft::new(registry);
        assert_eq!(d.place("Wizard", c, at(0, 3, 3)), Ok(Piece::new("Wizard".into(), c)));
    }

    #[proptest]
    fn place_fails_if_square_is_occupied(c: Color, d: Color) {
        let mut draft = Draft::default();
        draft.place("Rook", c, at(0, 0, 0))?;
        assert_eq!(
            draft.place("Queen", d, at(0, 0, 0)),
            Err(EditError::InvalidPlacement {
                at: at(0, 0, 0),
                reason: Obstruction::Occupied
            })
        );

        assert_eq!(draft.piece(at(0, 0, 0)), Some(&Piece::new("Rook".into(), c)));
    }

    #[proptest]
    fn place_fails_if_square_is_uninhabitable(c: Color) {
        let mut d = Draft::default();
        d.set_square(at(0, 4, 4), false, None)?;
        assert_eq!(
            d.place("Queen", c, at(0, 4, 4)),
            Err(EditError::InvalidPlacement {
                at: at(0, 4, 4),
                reason: Obstruction::Uninhabitable
            })
        );
    }

    #[proptest]
    fn place_fails_if_square_does_not_exist(
        c: Color,
        #[strategy(placement())]
        #[filter(#p.board > 0 || #p.square.row > 7 || #p.square.column > 7)]
        p: Placement,
    ) {
        let mut d = Draft::default();
        assert_eq!(
            d.place("Queen", c, p),
            Err(EditError::InvalidPlacement {
                at: p,
                reason: Obstruction::OutOfBounds
            })
        );
    }

    #[proptest]
    fn remove_takes_piece_off_board_and_team(c: Color) {
        let mut d = Draft::default();
        let p = d.place("Knight", c, at(0, 2, 5))?;
        assert_eq!(d.remove(at(0, 2, 5)), Ok(Some(p)));
        assert_eq!(d.piece(at(0, 2, 5)), None);
        assert_eq!(d.team(c).count(), 0);
    }

    #[proptest]
    fn remove_is_a_no_op_on_empty_square(#[strategy(0u8..8)] r: u8, #[strategy(0u8..8)] f: u8) {
        let mut d = Draft::default();
        assert_eq!(d.remove(at(0, r, f)), Ok(None));
        assert_eq!(d, Draft::default());
    }

    #[proptest]
    fn relocate_moves_piece_without_duplicating_it(c: Color) {
        let mut d = Draft::default();
        let p = d.place("Bishop", c, at(0, 0, 2))?;
        assert_eq!(d.relocate(at(0, 0, 2), at(0, 5, 5)), Ok(Some(p.clone())));
        assert_eq!(d.piece(at(0, 0, 2)), None);
        assert_eq!(Vec::from_iter(d.team(c)), [(at(0, 5, 5), &p)]);
    }

    #[proptest]
    fn relocate_onto_the_same_square_keeps_piece(c: Color) {
        let mut d = Draft::default();
        let p = d.place("Bishop", c, at(0, 0, 2))?;
        assert_eq!(d.relocate(at(0, 0, 2), at(0, 0, 2)), Ok(Some(p.clone())));
        assert_eq!(Vec::from_iter(d.team(c)), [(at(0, 0, 2), &p)]);
    }

    #[proptest]
    fn relocate_to_invalid_destination_changes_nothing(c: Color) {
        let mut d = Draft::default();
        d.place("Rook", c, at(0, 0, 0))?;
        d.place("Pawn", !c, at(0, 1, 1))?;
        d.set_square(at(0, 2, 2), false, None)?;

        let before = d.clone();

        for (to, reason) in [
            (at(0, 1, 1), Obstruction::Occupied),
            (at(0, 2, 2), Obstruction::Uninhabitable),
            (at(0, 9, 0), Obstruction::OutOfBounds),
            (at(1, 0, 0), Obstruction::OutOfBounds),
        ] {
            assert_eq!(
                d.relocate(at(0, 0, 0), to),
                Err(EditError::InvalidPlacement { at: to, reason })
            );

            assert_eq!(d, before);
        }
    }

    #[test]
    fn relocate_from_empty_square_is_a_no_op() {
        let mut d = Draft::default();
        assert_eq!(d.relocate(at(0, 3, 3), at(0, 4, 4)), Ok(None));
        assert_eq!(d, Draft::default());
    }

    #[proptest]
    fn set_square_refuses_to_make_occupied_square_uninhabitable(c: Color) {
        let mut d = Draft::default();
        d.place("King", c, at(0, 0, 4))?;
        let before = d.clone();

        assert_eq!(
            d.set_square(at(0, 0, 4), false, None),
            Err(EditError::SquareOccupied { at: at(0, 0, 4) })
        );

        assert_eq!(d, before);
    }

    #[proptest]
    fn set_square_can_tint_occupied_square(c: Color, #[filter(#t != Tint::HIGHLIGHT)] t: Tint) {
        let mut d = Draft::default();
        d.place("King", c, at(0, 0, 4))?;
        d.set_square(at(0, 0, 4), true, Some(t))?;
        assert_eq!(d.boards()[0].cell(Square::new(0, 4)).and_then(|c| c.tint), Some(t));
    }

    #[proptest]
    fn set_square_refuses_highlight_tint(habitable: bool) {
        let mut d = Draft::default();
        assert_eq!(
            d.set_square(at(0, 3, 3), habitable, Some(Tint::HIGHLIGHT)),
            Err(EditError::ReservedTint { at: at(0, 3, 3) })
        );

        assert_eq!(d, Draft::default());
    }

    #[test]
    fn set_promotions_for_both_sides_writes_both_maps() {
        let mut d = Draft::default();
        d.set_promotions("Pawn", vec!["Queen".into(), "Rook".into()], Sides::Both);

        for c in Color::iter() {
            assert_eq!(d.promotions(c).resolve("Pawn"), ["Queen", "Rook"]);
        }
    }

    #[proptest]
    fn set_promotions_for_one_side_leaves_the_other_alone(c: Color) {
        let mut d = Draft::default();
        d.set_promotions("Pawn", vec!["Knight".into()], Sides::Both);
        d.set_promotions("Pawn", vec!["Queen".into()], c.into());

        assert_eq!(d.promotions(c).resolve("Pawn"), ["Queen"]);
        assert_eq!(d.promotions(!c).resolve("Pawn"), ["Knight"]);
    }

    #[proptest]
    fn set_objective_records_name_without_checking_team(s: Sides) {
        let mut d = Draft::default();
        d.set_objective("Queen", s);

        for c in Color::iter() {
            let expected = s.contains(c).then(|| Objective::Piece("Queen".into()));
            assert_eq!(d.rules(c).objective, expected);
        }
    }

    #[proptest]
    fn conditions_can_be_replaced(c: Color, e: EndCondition) {
        let mut d = Draft::default();
        d.clear_conditions(c.into());
        d.add_condition(e.clone(), c.into());

        assert_eq!(d.rules(c).conditions, [e]);
        assert_eq!(d.rules(!c).conditions, [EndCondition::Classic]);
    }

    #[test]
    fn reshape_drops_pieces_on_vanished_squares() {
        let mut d = two_boards();
        let kept = d.place("King", Color::White, at(0, 1, 1)).unwrap();
        let gone = d.place("Queen", Color::Black, at(0, 7, 7)).unwrap();
        let lost = d.place("Pawn", Color::White, at(1, 0, 0)).unwrap();
        d.set_square(at(0, 2, 2), false, None).unwrap();

        let dropped = d.reshape(vec![Geometry::new(4, 4).unwrap()]).unwrap();

        assert_eq!(dropped, [(at(0, 7, 7), gone), (at(1, 0, 0), lost)]);
        assert_eq!(d.boards().len(), 1);
        assert_eq!(Vec::from_iter(d.team(Color::White)), [(at(0, 1, 1), &kept)]);
        assert_eq!(d.team(Color::Black).count(), 0);
        assert!(!d.boards()[0].is_habitable(Square::new(2, 2)));
        assert_consistent(&d);
    }

    #[test]
    fn reshape_requires_at_least_one_board() {
        let mut d = Draft::default();
        assert_eq!(d.reshape(vec![]), Err(EditError::NoBoards));
        assert_eq!(d, Draft::default());
    }

    #[proptest]
    fn rename_keeps_trimmed_name(#[strategy("[A-Z][a-z]{2,8}")] n: String) {
        let mut d = Draft::default();
        d.rename(&format!("  {n} "));
        assert_eq!(d.name(), n);
    }

    #[test]
    fn validate_fails_without_a_name() {
        let d = Draft::default();
        let errors = d.validate("  ").unwrap_err();
        assert_eq!(&errors[..], [ValidationError::EmptyName]);
    }

    #[test]
    fn validate_accepts_empty_variant_with_classic_objectives() {
        let record = Draft::default().validate("Empty").unwrap();
        assert_eq!(record.name(), "Empty");

        for c in Color::iter() {
            assert_eq!(record.army(c).rules.objective, Some(Objective::Classic));
            assert!(record.army(c).team.is_empty());
        }
    }

    #[proptest]
    fn validate_reports_missing_objective_without_mutating(c: Color) {
        let mut d = Draft::default();
        d.set_objective("King", c.into());
        d.place("King", !c, at(0, 7, 4))?;
        let before = d.clone();

        let errors = d.validate("Regicide").unwrap_err();

        assert_eq!(
            &errors[..],
            [ValidationError::MissingObjective {
                color: c,
                name: "King".into()
            }]
        );

        assert_eq!(d, before);
    }

    #[proptest]
    fn validate_reports_duplicate_objective_for_that_color_only(c: Color) {
        let mut d = Draft::default();
        d.set_objective("King", Sides::Both);
        d.place("King", c, at(0, 0, 3))?;
        d.place("King", c, at(0, 0, 4))?;
        d.place("King", !c, at(0, 7, 4))?;

        let errors = d.validate("Twins").unwrap_err();

        assert_eq!(
            &errors[..],
            [ValidationError::DuplicateObjective {
                color: c,
                name: "King".into(),
                count: 2
            }]
        );

        assert_eq!(errors.by_color(!c).count(), 0);
    }

    #[test]
    fn validate_collects_every_error() {
        let mut d = Draft::default();
        d.set_objective("Queen", Sides::Both);

        let errors = d.validate("").unwrap_err();

        assert_eq!(
            &errors[..],
            [
                ValidationError::EmptyName,
                ValidationError::MissingObjective {
                    color: Color::White,
                    name: "Queen".into()
                },
                ValidationError::MissingObjective {
                    color: Color::Black,
                    name: "Queen".into()
                },
            ]
        );
    }

    #[proptest]
    fn validate_ignores_team_count_of_explicit_classic_objective(c: Color) {
        let mut d = Draft::default();
        d.set_objective("", c.into());
        let record = d.validate("Kingless")?;
        assert_eq!(record.army(c).rules.objective, Some(Objective::Classic));
    }

    #[test]
    fn validate_resolves_promotions_of_every_piece() {
        let mut d = Draft::default();
        d.set_promotions("Pawn", vec!["Queen".into(), "Rook".into()], Sides::White);
        d.place("Pawn", Color::White, at(0, 1, 0)).unwrap();
        d.place("Pawn", Color::Black, at(0, 6, 0)).unwrap();
        d.place("Rook", Color::White, at(0, 0, 0)).unwrap();

        let record = d.validate("Promotions").unwrap();
        let white = &record.army(Color::White).team;
        let black = &record.army(Color::Black).team;

        assert_eq!(white[0].name, "Rook");
        assert!(white[0].promotes_to.is_empty());
        assert_eq!(white[1].name, "Pawn");
        assert_eq!(white[1].promotes_to, ["Queen", "Rook"]);
        assert_eq!(black[0].name, "Pawn");
        assert!(black[0].promotes_to.is_empty());
    }

    #[proptest]
    fn loading_validated_record_reproduces_it(
        #[strategy(proptest::collection::vec(any::<Edit>(), 0..32))] edits: Vec<Edit>,
        s: Sides,
    ) {
        let mut d = two_boards();
        d.set_promotions("Pawn", vec!["Amazon".into()], s);
        d.add_condition(EndCondition::CheckTimes(3), s);

        for e in edits {
            apply(&mut d, e).ok();
        }

        let record = d.validate("Replay")?;
        let reloaded = Draft::load(d.registry().clone(), record.clone());

        assert_eq!(reloaded.validate("Replay"), Ok(record));
        assert_eq!(reloaded.name(), "Replay");
    }

    #[test]
    fn display_draws_boards_top_row_first() {
        let mut d = Draft::new(Catalog::default());
        d.reshape(vec![Geometry::new(2, 3).unwrap()]).unwrap();
        d.place("King", Color::White, at(0, 0, 0)).unwrap();
        d.place("Queen", Color::Black, at(0, 1, 2)).unwrap();
        d.set_square(at(0, 1, 1), false, None).unwrap();

        assert_eq!(d.to_string(), "board 0 (2x3)\n.#q\nK..\n");
    }
}
