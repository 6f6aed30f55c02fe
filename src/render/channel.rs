//! 颜色通道定义：红、绿、蓝三支笔，顺序固定。

/// 绘图仪可用的三种墨色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// 固定的输出顺序：红 → 绿 → 蓝。
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// SVG 分组 id。
    pub fn id(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }

    pub fn stroke(self) -> &'static str {
        match self {
            Self::Red => "rgb(255,0,0)",
            Self::Green => "rgb(0,255,0)",
            Self::Blue => "rgb(0,0,255)",
        }
    }

    /// 从像素中取出本通道的值。
    pub fn value(self, rgb: [u8; 3]) -> u8 {
        rgb[self.index()]
    }
}
