use {
    crate::*,
    nom::{
        branch::alt,
        bytes::complete::tag,
        character::complete::{line_ending, one_of, space0},
        combinator::{map, map_opt, opt, value},
        error::Error,
        multi::{many0, many_m_n},
        sequence::{delimited, terminated, tuple},
        Err, IResult,
    },
    static_assertions::const_assert,
    std::mem::transmute,
    strum::{EnumCount, EnumIter, IntoEnumIterator},
};

pub const HALLWAY_LEN: usize = 11_usize;
pub const ROOM_COUNT: usize = Amphipod::COUNT;

/// The hallway slots directly above the four rooms, where no amphipod may stop
pub const CROSS_POSITIONS: [usize; ROOM_COUNT] = [2_usize, 4_usize, 6_usize, 8_usize];

/// The hallway slots where an amphipod leaving a room may stop
pub const STOP_POSITIONS: [usize; HALLWAY_LEN - ROOM_COUNT] =
    [0_usize, 1_usize, 3_usize, 5_usize, 7_usize, 9_usize, 10_usize];

// Every hallway slot is either a room crossing or a stop slot
const_assert!(CROSS_POSITIONS.len() + STOP_POSITIONS.len() == HALLWAY_LEN);

// This guarantees we can safely convert from `u8` to `Amphipod` by masking the smallest 2 bits,
// which is the same as masking by `U8_MASK`
const_assert!(Amphipod::COUNT == 4_usize);

#[derive(Clone, Copy, Debug, EnumCount, EnumIter, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum Amphipod {
    Amber,
    Bronze,
    Copper,
    Desert,
}

impl Amphipod {
    const U8_MASK: u8 = Self::COUNT as u8 - 1_u8;

    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        // SAFETY: See `const_assert` above
        unsafe { transmute(value & Self::U8_MASK) }
    }

    /// Energy spent for each cell an amphipod of this kind travels through
    #[inline]
    pub const fn energy_per_step(self) -> u32 {
        10_u32.pow(self as u32)
    }

    /// The index of the room this kind occupies in the sorted burrow
    #[inline]
    pub const fn target_room(self) -> usize {
        self as usize
    }
}

impl Parse for Amphipod {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map_opt(one_of("ABCD"), |value: char| value.try_into().ok())(input)
    }
}

impl TryFrom<char> for Amphipod {
    type Error = ();

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'A'..='D' => Ok(Self::from_u8(value as u8 - UPPERCASE_A_OFFSET)),
            _ => Err(()),
        }
    }
}

/// A complete snapshot of the burrow: hallway occupancy plus the occupancy of all four rooms
///
/// Room slot 0 is adjacent to the hallway; slot `room_depth() - 1` is the room's bottom. Values
/// are immutable once constructed: applying a move produces a new `Burrow` rather than mutating a
/// shared one, and full value equality/hashing makes `Burrow` the search-graph node identity.
#[cfg_attr(test, derive(Debug))]
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Burrow {
    hallway: [Option<Amphipod>; HALLWAY_LEN],
    rooms: [Vec<Option<Amphipod>>; ROOM_COUNT],
}

impl Burrow {
    /// The goal layout for a given room depth: every room filled with its own kind, hallway empty
    pub fn sorted(room_depth: usize) -> Self {
        let mut sorted: Self = Self::empty();

        for (room, amphipod) in sorted.rooms.iter_mut().zip(Amphipod::iter()) {
            room.resize(room_depth, Some(amphipod));
        }

        sorted
    }

    pub fn room_depth(&self) -> usize {
        self.rooms[0_usize].len()
    }

    /// The same burrow with the two folded-up rows (`DCBA`, then `DBAC`) inserted below the top
    /// room row
    pub fn unfolded(&self) -> Self {
        use Amphipod::{Amber, Bronze, Copper, Desert};

        const INSERTED_ROWS: [[Amphipod; ROOM_COUNT]; 2_usize] = [
            [Desert, Copper, Bronze, Amber],
            [Desert, Bronze, Amber, Copper],
        ];

        let mut unfolded: Self = self.clone();

        for (room_index, room) in unfolded.rooms.iter_mut().enumerate() {
            for inserted_row in INSERTED_ROWS.iter().rev() {
                room.insert(1_usize, Some(inserted_row[room_index]));
            }
        }

        unfolded
    }

    /// The minimal total energy to reach the sorted layout, or `None` if no sequence of legal
    /// moves reaches it
    pub fn try_min_sort_energy(&self) -> Option<u32> {
        SortBurrow {
            start: self.clone(),
            sorted: Self::sorted(self.room_depth()),
        }
        .run()
    }

    /// Every legal single-amphipod move from this layout, as the resulting layout and its energy
    /// cost
    pub fn push_moves(&self, moves: &mut Vec<OpenSetElement<Self, u32>>) {
        self.push_hallway_to_room_moves(moves);
        self.push_room_to_hallway_moves(moves);
    }

    fn empty() -> Self {
        Self {
            hallway: Default::default(),
            rooms: Default::default(),
        }
    }

    /// Whether the hallway is empty from `from` (exclusive) to `to` (inclusive)
    fn hallway_is_clear(&self, from: usize, to: usize) -> bool {
        let (start, end): (usize, usize) = if from < to {
            (from + 1_usize, to)
        } else {
            (to, from - 1_usize)
        };

        self.hallway[start..=end].iter().all(Option::is_none)
    }

    fn push_hallway_to_room_moves(&self, moves: &mut Vec<OpenSetElement<Self, u32>>) {
        for (hallway_index, amphipod) in self
            .hallway
            .iter()
            .enumerate()
            .filter_map(|(hallway_index, slot)| slot.map(|amphipod| (hallway_index, amphipod)))
        {
            let room_index: usize = amphipod.target_room();
            let room: &[Option<Amphipod>] = &self.rooms[room_index];

            // An amphipod only enters its own room, and only while no other kind remains in it
            if room
                .iter()
                .any(|slot| slot.map_or(false, |occupant| occupant != amphipod))
            {
                continue;
            }

            let cross_position: usize = CROSS_POSITIONS[room_index];

            if !self.hallway_is_clear(hallway_index, cross_position) {
                continue;
            }

            let dest_depth_option: Option<usize> = room.iter().rposition(Option::is_none);

            // A room that passed the occupancy check still has a vacancy for a hallway amphipod of
            // its kind, as long as kind counts match the room depth
            debug_assert!(dest_depth_option.is_some());

            let Some(dest_depth) = dest_depth_option else {
                continue;
            };

            let distance: usize = hallway_index.abs_diff(cross_position) + dest_depth + 1_usize;
            let mut next: Self = self.clone();

            next.hallway[hallway_index] = None;
            next.rooms[room_index][dest_depth] = Some(amphipod);
            moves.push(OpenSetElement(
                next,
                distance as u32 * amphipod.energy_per_step(),
            ));
        }
    }

    fn push_room_to_hallway_moves(&self, moves: &mut Vec<OpenSetElement<Self, u32>>) {
        for (room_index, room) in self.rooms.iter().enumerate() {
            // Slots below the shallowest occupied one are blocked by it
            let Some(src_depth) = room.iter().position(Option::is_some) else {
                continue;
            };

            let amphipod: Amphipod = room[src_depth].unwrap();

            if amphipod.target_room() == room_index
                && room[src_depth + 1_usize..]
                    .iter()
                    .all(|slot| *slot == Some(amphipod))
            {
                // Settled: in its own room with no wrongly-kinded amphipod beneath it
                continue;
            }

            let cross_position: usize = CROSS_POSITIONS[room_index];

            for stop_position in STOP_POSITIONS {
                if !self.hallway_is_clear(cross_position, stop_position) {
                    continue;
                }

                let distance: usize = cross_position.abs_diff(stop_position) + src_depth + 1_usize;
                let mut next: Self = self.clone();

                next.rooms[room_index][src_depth] = None;
                next.hallway[stop_position] = Some(amphipod);
                moves.push(OpenSetElement(
                    next,
                    distance as u32 * amphipod.energy_per_step(),
                ));
            }
        }
    }

    fn parse_slot<'i>(input: &'i str) -> IResult<&'i str, Option<Amphipod>> {
        alt((value(None, tag(".")), map(Amphipod::parse, Some)))(input)
    }

    fn parse_room_row<'i>(input: &'i str) -> IResult<&'i str, [Option<Amphipod>; ROOM_COUNT]> {
        map(
            many_m_n(
                ROOM_COUNT,
                ROOM_COUNT,
                terminated(Self::parse_slot, tag("#")),
            ),
            |slots: Vec<Option<Amphipod>>| slots.try_into().unwrap(),
        )(input)
    }
}

impl Parse for Burrow {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            tuple((
                terminated(tag("#############"), line_ending),
                delimited(
                    tag("#"),
                    many_m_n(HALLWAY_LEN, HALLWAY_LEN, Self::parse_slot),
                    tuple((tag("#"), line_ending)),
                ),
                delimited(
                    tag("###"),
                    Self::parse_room_row,
                    tuple((tag("##"), line_ending)),
                ),
                many0(delimited(
                    tag("  #"),
                    Self::parse_room_row,
                    tuple((space0, line_ending)),
                )),
                tuple((tag("  #########"), space0, opt(line_ending))),
            )),
            |(_, hallway_slots, first_room_row, lower_room_rows, _)| {
                let mut burrow: Self = Self::empty();

                for (slot, hallway_slot) in hallway_slots.into_iter().zip(burrow.hallway.iter_mut())
                {
                    *hallway_slot = slot;
                }

                for room_row in [first_room_row].into_iter().chain(lower_room_rows) {
                    for (room, slot) in burrow.rooms.iter_mut().zip(room_row) {
                        room.push(slot);
                    }
                }

                burrow
            },
        )(input)
    }
}

impl<'i> TryFrom<&'i str> for Burrow {
    type Error = Err<Error<&'i str>>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::parse(input)?.1)
    }
}

struct SortBurrow {
    start: Burrow,
    sorted: Burrow,
}

impl Dijkstra for SortBurrow {
    type Vertex = Burrow;
    type Cost = u32;

    fn start(&self) -> &Burrow {
        &self.start
    }

    fn is_end(&self, vertex: &Burrow) -> bool {
        *vertex == self.sorted
    }

    fn neighbors(&self, vertex: &Burrow, neighbors: &mut Vec<OpenSetElement<Burrow, u32>>) {
        vertex.push_moves(neighbors);
    }
}
