use half::f16;

// Constants for the input tensor
pub const NUM_PIECE_CHANNELS: usize = 12; // 6 piece kinds x 2 sides
pub const SIDE_TO_MOVE_CHANNEL: usize = 12;
pub const CASTLING_CHANNEL_BASE: usize = 13; // 4 castling-right planes
pub const EN_PASSANT_CHANNEL: usize = 17;
pub const NUM_CHANNELS: usize = 18;

pub const BOARD_CELLS: usize = 64;
pub const TENSOR_LEN: usize = NUM_CHANNELS * BOARD_CELLS; // 1152 cells

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    const fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A position rendered into the model's input frame.
///
/// The tensor is 18 channels of 8x8 cells, addressed
/// `channel * 64 + row * 8 + col` with row 0 = rank 1 and col 0 = file a.
/// `mirrored` records whether the position was flipped so that the side to
/// move always occupies channels 0-5; legal moves must be translated through
/// the same flip before any vocabulary lookup.
pub struct EncodedPosition {
    pub tensor: Box<[f16; TENSOR_LEN]>,
    pub mirrored: bool,
}

fn fill_plane(tensor: &mut [f16; TENSOR_LEN], channel: usize) {
    for cell in &mut tensor[channel * BOARD_CELLS..(channel + 1) * BOARD_CELLS] {
        *cell = f16::ONE;
    }
}

/// Renders a FEN position into the model's canonical-mover frame.
///
/// Missing optional fields default to `"w"`, `"-"`, `"-"`; malformed piece
/// characters and malformed en-passant fields are skipped rather than
/// errored. No legality checking happens here.
pub fn encode_fen(fen: &str) -> EncodedPosition {
    let mut fields = fen.split_ascii_whitespace();
    let placement = fields.next().unwrap_or("");
    let side_to_move = fields.next().unwrap_or("w");
    let castling = fields.next().unwrap_or("-");
    let en_passant = fields.next().unwrap_or("-");

    // The model always sees the position from the mover's side, so a
    // black-to-move position is flipped vertically with the piece and
    // castling channel pairs swapped.
    let mirrored = side_to_move == "b";

    let mut tensor = Box::new([f16::ZERO; TENSOR_LEN]);

    // Channels 0-11: piece planes, own side first
    for (row_index, rank_row) in placement.split('/').take(8).enumerate() {
        let row = if mirrored { row_index } else { 7 - row_index };
        let mut col = 0usize;
        for c in rank_row.chars() {
            if col > 7 {
                break;
            }
            if let Some(skip) = c.to_digit(10) {
                col += skip as usize;
                continue;
            }
            if let Some(kind) = PieceKind::from_char(c) {
                let own_side = c.is_ascii_uppercase() != mirrored;
                let channel = if own_side { 0 } else { 6 } + kind as usize;
                tensor[channel * BOARD_CELLS + row * 8 + col] = f16::ONE;
            }
            col += 1;
        }
    }

    // Channel 12: side to move, always filled once the mover's side has
    // been normalized onto channels 0-5
    if mirrored || side_to_move == "w" {
        fill_plane(&mut tensor, SIDE_TO_MOVE_CHANNEL);
    }

    // Channels 13-16: castling rights as full planes, own side first
    for c in castling.chars() {
        let channel = match (c, mirrored) {
            ('K', false) | ('k', true) => Some(CASTLING_CHANNEL_BASE),
            ('Q', false) | ('q', true) => Some(CASTLING_CHANNEL_BASE + 1),
            ('k', false) | ('K', true) => Some(CASTLING_CHANNEL_BASE + 2),
            ('q', false) | ('Q', true) => Some(CASTLING_CHANNEL_BASE + 3),
            _ => None,
        };
        if let Some(channel) = channel {
            fill_plane(&mut tensor, channel);
        }
    }

    // Channel 17: en-passant target, a single cell
    if let Some((file, rank)) = parse_square(en_passant) {
        let rank = if mirrored { 7 - rank } else { rank };
        tensor[EN_PASSANT_CHANNEL * BOARD_CELLS + rank * 8 + file] = f16::ONE;
    }

    EncodedPosition { tensor, mirrored }
}

/// Parses a two-character square like `"e3"` into `(col, row)` indices.
/// Anything else, `"-"` included, yields `None`.
fn parse_square(square: &str) -> Option<(usize, usize)> {
    let mut chars = square.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(file), Some(rank), None) => {
            if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
                return None;
            }
            let col = file as usize - 'a' as usize;
            let row = rank as usize - '1' as usize;
            Some((col, row))
        }
        _ => None,
    }
}
